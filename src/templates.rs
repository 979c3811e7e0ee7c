use std::sync::OnceLock;
use tera::Tera;

static TERA: OnceLock<Tera> = OnceLock::new();

const TEMPLATES: [(&str, &str); 2] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
];

/// Templates are compiled into the binary and parsed on first use.
pub fn get_tera() -> &'static Tera {
    TERA.get_or_init(|| {
        let mut tera = Tera::default();
        if let Err(e) = tera.add_raw_templates(TEMPLATES) {
            tracing::error!("Failed to load templates: {}", e);
        }
        tera
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_templates_parse() {
        let names: Vec<&str> = get_tera().get_template_names().collect();
        assert!(names.contains(&"index.html"));
        assert!(names.contains(&"base.html"));
    }
}
