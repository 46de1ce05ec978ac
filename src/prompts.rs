pub const SOCIAL_POST: &str = include_str!("../data/prompts/social_post.txt");
pub const TEASER: &str = include_str!("../data/prompts/teaser.txt");
pub const CHAT: &str = include_str!("../data/prompts/chat.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass, so placeholder syntax inside a value is
/// copied through literally. Unknown placeholders are left as-is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_does_not_expand_values() {
        assert_eq!(
            render(
                SOCIAL_POST,
                &[("platform", "{{imageDesc}}"), ("imageDesc", "x")]
            ),
            "Write a catchy {{imageDesc}} post for this image: x"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unterminated() {
        assert_eq!(render("{{missing}} {{open", &[]), "{{missing}} {{open");
    }

    #[test]
    fn test_templates_have_no_trailing_newline() {
        for template in [SOCIAL_POST, TEASER, CHAT] {
            assert!(!template.ends_with('\n'));
        }
    }

    #[test]
    fn test_templates_have_placeholders() {
        assert!(SOCIAL_POST.contains("{{platform}}"));
        assert!(SOCIAL_POST.contains("{{imageDesc}}"));
        assert!(TEASER.contains("{{imageDesc}}"));
        assert!(CHAT.contains("{{message}}"));
    }
}
