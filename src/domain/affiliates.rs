//! Affiliate course offers shown next to articles.

use serde::{Deserialize, Serialize};

use super::{error::DomainError, validation};

/// A promoted course. `tag` correlates the offer with article tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateOffer {
    pub tag: String,
    pub course_title: String,
    pub course_link: String,
    pub pitch: String,
}

impl AffiliateOffer {
    pub fn validate(&self, index: usize) -> Result<(), DomainError> {
        validation::non_empty(&format!("affiliates[{index}].tag"), &self.tag)?;
        validation::non_empty(
            &format!("affiliates[{index}].courseTitle"),
            &self.course_title,
        )?;
        validation::absolute_url(&format!("affiliates[{index}].courseLink"), &self.course_link)?;
        validation::non_empty(&format!("affiliates[{index}].pitch"), &self.pitch)
    }

    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag.trim())
    }
}

/// All offers carrying `tag`, in display order.
pub fn offers_for_tag<'a>(
    offers: &'a [AffiliateOffer],
    tag: &'a str,
) -> impl Iterator<Item = &'a AffiliateOffer> + 'a {
    offers.iter().filter(move |offer| offer.matches_tag(tag))
}

/// First offer, by display priority, whose tag appears among `article_tags`.
pub fn offer_for_article<'a, S: AsRef<str>>(
    offers: &'a [AffiliateOffer],
    article_tags: &[S],
) -> Option<&'a AffiliateOffer> {
    offers.iter().find(|offer| {
        article_tags
            .iter()
            .any(|tag| offer.matches_tag(tag.as_ref()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(tag: &str, title: &str) -> AffiliateOffer {
        AffiliateOffer {
            tag: tag.to_string(),
            course_title: title.to_string(),
            course_link: format!("https://courses.example.com/{tag}"),
            pitch: format!("Learn {tag}"),
        }
    }

    #[test]
    fn article_match_follows_offer_priority_not_tag_order() {
        let offers = vec![offer("react", "React"), offer("javascript", "JavaScript")];

        let selected = offer_for_article(&offers, &["javascript", "react"]).expect("match");
        assert_eq!(selected.tag, "react");
    }

    #[test]
    fn article_without_matching_tag_gets_no_offer() {
        let offers = vec![offer("react", "React")];
        assert!(offer_for_article(&offers, &["vue", "css"]).is_none());
        assert!(offer_for_article::<&str>(&offers, &[]).is_none());
    }

    #[test]
    fn duplicate_tags_are_returned_in_order() {
        let offers = vec![
            offer("react", "First"),
            offer("javascript", "Other"),
            offer("react", "Second"),
        ];

        let titles: Vec<_> = offers_for_tag(&offers, "React")
            .map(|offer| offer.course_title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn validation_reports_offer_index() {
        let mut broken = offer("react", "React");
        broken.course_link = "courses/react".to_string();

        let err = broken.validate(3).expect_err("relative link rejected");
        assert_eq!(err.field(), "affiliates[3].courseLink");
    }
}
