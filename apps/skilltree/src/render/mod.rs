#![allow(dead_code)]
//! Output formats for a finished `SkillTree`: pretty JSON and a
//! self-contained D3 page.

use crate::taxonomy::SkillTree;

const HTML_TEMPLATE: &str = include_str!("skill_tree.html");
const DATA_PLACEHOLDER: &str = "__SKILL_TREE_JSON__";

pub fn to_json(tree: &SkillTree) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(tree)
}

pub fn to_json_pretty(tree: &SkillTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tree)
}

/// Renders the interactive page with the tree JSON inlined.
pub fn render_html(tree: &SkillTree) -> Result<String, serde_json::Error> {
    // "</" only occurs inside JSON strings, where "<\/" decodes to the same text.
    let data = to_json_pretty(tree)?.replace("</", "<\\/");
    Ok(HTML_TEMPLATE.replace(DATA_PLACEHOLDER, &data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::models::{Category, SkillRecord, Source};
    use crate::taxonomy::build;

    fn tree_with(label: &str) -> SkillTree {
        build(vec![SkillRecord::new(Category::Technical, label, 0.9, Source::Ai)])
    }

    #[test]
    fn test_template_has_exactly_one_placeholder() {
        assert_eq!(HTML_TEMPLATE.matches(DATA_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_html_embeds_tree_json() {
        let html = render_html(&tree_with("Rust")).unwrap();
        assert!(!html.contains(DATA_PLACEHOLDER));
        assert!(html.contains(r#""label": "Rust""#));
        assert!(html.contains(r#""categories""#));
    }

    #[test]
    fn test_html_escapes_script_terminators() {
        let html = render_html(&tree_with("</script><b>x")).unwrap();
        assert_eq!(html.matches("</script>").count(), 2);
        assert!(html.contains(r#"<\/script><b>x"#));
    }

    #[test]
    fn test_markup_labels_only_reach_text_sinks() {
        let label = "<img src=x onerror=alert(1)>";
        let html = render_html(&tree_with(label)).unwrap();
        // The label is data for `.text()`, never parsed as markup by the page script.
        assert!(html.contains(label));
        assert!(!html.contains(".html("));
        assert!(!html.contains("innerHTML"));
        assert!(html.contains(r#"tip.append("strong").text(d.data.name)"#));
    }

    #[test]
    fn test_json_value_matches_tree_shape() {
        let value = to_json(&tree_with("Rust")).unwrap();
        let category = &value["categories"][0];
        assert_eq!(category["id"], "technical");
        assert_eq!(category["name"], "Technical");
        assert_eq!(category["children"][0]["label"], "Rust");
        assert!(category["children"][0].get("evidence").is_none());
    }

    #[test]
    fn test_pretty_json_is_stable() {
        let a = to_json_pretty(&tree_with("Go")).unwrap();
        let b = to_json_pretty(&tree_with("Go")).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("{\n  \"categories\""));
    }
}
