#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub label: String,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Ordered list of navigable sections. Display order and scan order both
/// follow insertion order; a repeated id keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<Section>,
}

impl SectionRegistry {
    pub fn new(sections: impl IntoIterator<Item = Section>) -> Self {
        let mut registry = Self::default();
        for section in sections {
            if !registry.contains(&section.id) {
                registry.sections.push(section);
            }
        }
        registry
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn first(&self) -> Option<&Section> {
        self.sections.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_keeps_order_and_drops_duplicates() {
        let registry = SectionRegistry::new([
            Section::new("home", "Home"),
            Section::new("about", "About"),
            Section::new("home", "Home again"),
            Section::new("contact", "Contact"),
        ]);
        let ids = registry.iter().map(|s| s.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["home", "about", "contact"]);
        assert_eq!(registry.get("home").map(|s| s.label.as_str()), Some("Home"));
        assert!(!registry.contains("skills"));
    }
}
