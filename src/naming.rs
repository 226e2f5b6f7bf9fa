use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageRole {
    Before,
    After,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageName {
    pub base: String,
    pub role: ImageRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    pub extension: String,
    pub after_marker: String,
    pub result_marker: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            extension: ".jpg".into(),
            after_marker: "~2".into(),
            result_marker: "~3".into(),
        }
    }
}

impl NamingConvention {
    /// Returns `None` for names without the extension and for names with a
    /// marker anywhere other than right before the extension.
    pub fn parse(&self, file_name: &str) -> Option<ImageName> {
        let stem = file_name.strip_suffix(self.extension.as_str())?;
        if stem.is_empty() {
            return None;
        }

        let (base, role) = if let Some(base) = stem.strip_suffix(self.after_marker.as_str()) {
            (base, ImageRole::After)
        } else if let Some(base) = stem.strip_suffix(self.result_marker.as_str()) {
            (base, ImageRole::Result)
        } else {
            (stem, ImageRole::Before)
        };

        if base.is_empty() || self.has_marker(base) {
            return None;
        }

        Some(ImageName {
            base: base.to_string(),
            role,
        })
    }

    pub fn format(&self, base: &str, role: ImageRole) -> String {
        let marker = match role {
            ImageRole::Before => "",
            ImageRole::After => self.after_marker.as_str(),
            ImageRole::Result => self.result_marker.as_str(),
        };
        format!("{base}{marker}{}", self.extension)
    }

    fn has_marker(&self, text: &str) -> bool {
        text.contains(self.after_marker.as_str()) || text.contains(self.result_marker.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(base: &str, role: ImageRole) -> Option<ImageName> {
        Some(ImageName {
            base: base.into(),
            role,
        })
    }

    #[test]
    fn test_parse_roles() {
        let naming = NamingConvention::default();

        assert_eq!(naming.parse("a.jpg"), name("a", ImageRole::Before));
        assert_eq!(naming.parse("a~2.jpg"), name("a", ImageRole::After));
        assert_eq!(naming.parse("a~3.jpg"), name("a", ImageRole::Result));
        assert_eq!(naming.parse("site 4.final.jpg"), name("site 4.final", ImageRole::Before));
    }

    #[test]
    fn test_parse_rejects_foreign_names() {
        let naming = NamingConvention::default();

        assert_eq!(naming.parse("a.png"), None);
        assert_eq!(naming.parse("a.JPG"), None);
        assert_eq!(naming.parse(".jpg"), None);
        assert_eq!(naming.parse("~2.jpg"), None);
        assert_eq!(naming.parse("x~2y.jpg"), None);
        assert_eq!(naming.parse("a~3~2.jpg"), None);
        assert_eq!(naming.parse("notes.txt"), None);
    }

    #[test]
    fn test_format_inverts_parse() {
        let naming = NamingConvention::default();

        for file in ["a.jpg", "a~2.jpg", "b c~3.jpg"] {
            let parsed = naming.parse(file).unwrap();
            assert_eq!(naming.format(&parsed.base, parsed.role), file);
        }
        assert_eq!(naming.format("a", ImageRole::Result), "a~3.jpg");
    }

    #[test]
    fn test_custom_convention() {
        let naming = NamingConvention {
            extension: ".png".into(),
            after_marker: "_after".into(),
            result_marker: "_diff".into(),
        };

        assert_eq!(naming.parse("door_after.png"), name("door", ImageRole::After));
        assert_eq!(naming.format("door", ImageRole::Result), "door_diff.png");
        assert_eq!(naming.parse("door~2.jpg"), None);
    }
}
