use std::collections::HashSet;

use serde::Serialize;

use crate::naming::{ImageRole, NamingConvention};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePair {
    pub before: String,
    pub after: String,
    pub output: String,
}

pub struct PairResolver {
    naming: NamingConvention,
}

impl PairResolver {
    pub fn new(naming: NamingConvention) -> Self {
        Self { naming }
    }

    pub fn resolve<S: AsRef<str>>(&self, file_names: &[S]) -> Vec<ImagePair> {
        let available = file_names.iter().map(|n| n.as_ref()).collect::<HashSet<_>>();
        let mut seen = HashSet::new();

        file_names
            .iter()
            .map(|n| n.as_ref())
            .filter_map(|file_name| {
                let parsed = self.naming.parse(file_name)?;
                if parsed.role != ImageRole::Before {
                    return None;
                }

                let after = self.naming.format(&parsed.base, ImageRole::After);
                if !available.contains(after.as_str()) || !seen.insert(file_name) {
                    return None;
                }

                Some(ImagePair {
                    before: file_name.to_string(),
                    after,
                    output: self.naming.format(&parsed.base, ImageRole::Result),
                })
            })
            .collect()
    }
}

impl Default for PairResolver {
    fn default() -> Self {
        Self::new(NamingConvention::default())
    }
}
