//! Exported image fields
//!
//! Ordered table of the metadata fields an image carries. The explore view
//! walks it in order, so the table order is the display order.

/// Selectable value of a multi-value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub is_explore_visible: bool,
    pub options: Option<&'static [FieldOption]>,
}

const fn field(key: &'static str, label: &'static str, is_explore_visible: bool) -> FieldDefinition {
    FieldDefinition {
        key,
        label,
        is_explore_visible,
        options: None,
    }
}

const fn multi(
    key: &'static str,
    label: &'static str,
    options: &'static [FieldOption],
) -> FieldDefinition {
    FieldDefinition {
        key,
        label,
        is_explore_visible: true,
        options: Some(options),
    }
}

const fn opt(value: &'static str, label: &'static str) -> FieldOption {
    FieldOption { value, label }
}

const CONTEXTS: &[FieldOption] = &[
    opt("internal", "Internal presentation"),
    opt("social", "Social media"),
    opt("ads", "Advertising campaign"),
    opt("web", "Website"),
    opt("print", "Print"),
];

const CATEGORIES: &[FieldOption] = &[
    opt("product", "Product"),
    opt("people", "People"),
    opt("landscape", "Landscape"),
    opt("abstract", "Abstract"),
    opt("architecture", "Architecture"),
    opt("food", "Food"),
];

const AUDIENCES: &[FieldOption] = &[
    opt("customers", "Customers"),
    opt("partners", "Partners"),
    opt("employees", "Employees"),
];

pub const EXPORT_IMAGE_FIELDS: &[FieldDefinition] = &[
    field("imageID", "Image ID", false),
    field("imageGcsURI", "Storage URI", false),
    field("imageFormat", "Format", true),
    field("imageCreationDate", "Creation date", true),
    field("imageLabel", "Name", true),
    field("imageGenerationPrompt", "Prompt", true),
    field("imageGenerationModel", "Model", true),
    field("imageRatio", "Aspect ratio", true),
    field("imageWidth", "Width (px)", true),
    field("imageHeight", "Height (px)", true),
    field("imageUpscaleFactor", "Upscale factor", true),
    field("imageLeveragedModel", "Leveraged model", false),
    field("imageAuthor", "Who created it?", true),
    multi("imageContexts", "In which context(s) will it be used?", CONTEXTS),
    multi("imageCategories", "Which categories does it belong to?", CATEGORIES),
    multi("imageAudiences", "Who is the target audience?", AUDIENCES),
    field("imageIsFavorite", "Is it a favorite?", true),
    field("imageDescription", "Description", true),
];

pub fn field_definition(key: &str) -> Option<&'static FieldDefinition> {
    EXPORT_IMAGE_FIELDS.iter().find(|f| f.key == key)
}

impl FieldDefinition {
    /// Label as shown to users, with the first `?` removed.
    pub fn display_label(&self) -> String {
        self.label.replacen('?', "", 1)
    }

    /// Human-readable label for a multi-value option, if one is defined.
    pub fn option_label(&self, value: &str) -> Option<&'static str> {
        self.options?
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = EXPORT_IMAGE_FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), EXPORT_IMAGE_FIELDS.len());
    }

    #[test]
    fn test_display_label_removes_first_question_mark() {
        let author = field_definition("imageAuthor").unwrap();
        assert_eq!(author.display_label(), "Who created it");

        let def = field("k", "Really?? sure", true);
        assert_eq!(def.display_label(), "Really? sure");
    }

    #[test]
    fn test_option_label() {
        let contexts = field_definition("imageContexts").unwrap();
        assert_eq!(contexts.option_label("ads"), Some("Advertising campaign"));
        assert_eq!(contexts.option_label("billboard"), None);

        let format = field_definition("imageFormat").unwrap();
        assert_eq!(format.option_label("PNG"), None);
    }
}
