pub const ART: &str = include_str!("../data/prompts/art.txt");
pub const DEFINITION: &str = include_str!("../data/prompts/definition.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
