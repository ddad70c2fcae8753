//! Built-in candidate patterns offered during training

use newsprint_domain::{Field, FieldPattern};

/// Patterns that commonly locate `field` on news sites, with a short label
pub fn builtin_candidates(field: Field) -> Vec<(&'static str, FieldPattern)> {
    match field {
        Field::Body => vec![
            ("article paragraphs", FieldPattern::css("article p")),
            ("articleBody paragraphs", FieldPattern::css("[itemprop=articleBody] p")),
        ],
        Field::Description => vec![
            ("meta description", meta_name("description")),
            ("og:description", meta_property("og:description")),
        ],
        Field::Keywords => vec![
            ("meta keywords", meta_name("keywords")),
            ("news_keywords", meta_name("news_keywords")),
        ],
        Field::Section => vec![("article:section", meta_property("article:section"))],
        Field::Time => vec![
            ("article:published_time", meta_property("article:published_time")),
            ("time datetime", FieldPattern::xpath("//time/@datetime")),
        ],
        Field::Title => vec![
            ("og:title", meta_property("og:title")),
            ("h1", FieldPattern::css("h1")),
            ("title", FieldPattern::css("title")),
        ],
    }
}

fn meta_name(name: &str) -> FieldPattern {
    FieldPattern::xpath(format!("//meta[@name='{}']/@content", name))
}

fn meta_property(property: &str) -> FieldPattern {
    FieldPattern::xpath(format!("//meta[@property='{}']/@content", property))
}
