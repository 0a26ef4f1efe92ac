use crate::document::Metadata;

/// Left and right footer text for slide `current` (zero-based) of `total`.
///
/// The left side is `author · date`. The right side is the `footer`
/// template when set, otherwise the printf-style `paging` template.
pub fn footer_text(metadata: &Metadata, current: usize, total: usize) -> (String, String) {
    let author = metadata.author.as_deref().unwrap_or_default();
    let date = metadata.date.as_deref().unwrap_or_default();
    let left = [author, date]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");

    let current = (current + 1).to_string();
    let total = total.to_string();
    let right = match (&metadata.footer, &metadata.paging) {
        (Some(footer), _) => footer
            .replace("{author}", author)
            .replace("{date}", date)
            .replace("{current_slide}", &current)
            .replace("{total_slides}", &total),
        (None, Some(paging)) => paging
            .replacen("%d", &current, 1)
            .replacen("%d", &total, 1),
        (None, None) => String::new(),
    };
    (left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DEFAULT_PAGING;

    fn metadata() -> Metadata {
        Metadata {
            paging: Some(DEFAULT_PAGING.to_string()),
            ..Metadata::default()
        }
    }

    #[test]
    fn test_default_paging() {
        let (left, right) = footer_text(&metadata(), 0, 3);
        assert_eq!(left, "");
        assert_eq!(right, "Slide 1 / 3");
    }

    #[test]
    fn test_author_and_date() {
        let meta = Metadata {
            author: Some("Ada".to_string()),
            date: Some("2024-05-01".to_string()),
            ..metadata()
        };
        assert_eq!(footer_text(&meta, 1, 2).0, "Ada · 2024-05-01");

        let meta = Metadata {
            date: Some("today".to_string()),
            ..metadata()
        };
        assert_eq!(footer_text(&meta, 1, 2).0, "today");
    }

    #[test]
    fn test_footer_template_wins_over_paging() {
        let meta = Metadata {
            author: Some("Ada".to_string()),
            footer: Some("{author}: {current_slide} of {total_slides} {date}".to_string()),
            ..metadata()
        };
        assert_eq!(footer_text(&meta, 4, 9).1, "Ada: 5 of 9 ");
    }

    #[test]
    fn test_custom_paging_template() {
        let meta = Metadata {
            paging: Some("%d/%d".to_string()),
            ..Metadata::default()
        };
        assert_eq!(footer_text(&meta, 0, 7).1, "1/7");
    }

    #[test]
    fn test_paging_without_placeholders_is_literal() {
        let meta = Metadata {
            paging: Some("deck".to_string()),
            ..Metadata::default()
        };
        assert_eq!(footer_text(&meta, 0, 7).1, "deck");
    }

    #[test]
    fn test_no_templates_is_empty() {
        assert_eq!(
            footer_text(&Metadata::default(), 0, 1),
            (String::new(), String::new())
        );
    }
}
