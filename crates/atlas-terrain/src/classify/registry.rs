//! Category registry: maps [`CategoryId`] to [`CategoryDef`] with name-based lookup.

use hashbrown::HashMap;

/// Unique identifier for a terrain category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(pub u16);

/// Descriptor for one terrain category.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryDef {
    /// Unique name (e.g. "deep_water").
    pub name: String,
    /// Display color as RGB.
    pub color: (u8, u8, u8),
    /// Single character used by text previews.
    pub glyph: char,
}

impl CategoryDef {
    /// Create a category definition.
    pub fn new(name: impl Into<String>, color: (u8, u8, u8), glyph: char) -> Self {
        Self {
            name: name.into(),
            color,
            glyph,
        }
    }
}

/// Errors that can occur when registering categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryRegistryError {
    /// A category with this name is already registered.
    #[error("duplicate category name: {0}")]
    DuplicateName(String),

    /// The registry already holds `u16::MAX + 1` categories.
    #[error("category registry is full")]
    Full,
}

/// Stores all registered categories with O(1) lookup by ID.
#[derive(Clone, Debug, Default)]
pub struct CategoryRegistry {
    categories: Vec<CategoryDef>,
    name_to_id: HashMap<String, CategoryId>,
}

impl CategoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new category, returning its assigned [`CategoryId`].
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRegistryError::DuplicateName`] if the name is taken.
    pub fn register(&mut self, def: CategoryDef) -> Result<CategoryId, CategoryRegistryError> {
        if self.name_to_id.contains_key(&def.name) {
            return Err(CategoryRegistryError::DuplicateName(def.name));
        }
        let index = u16::try_from(self.categories.len()).map_err(|_| CategoryRegistryError::Full)?;
        let id = CategoryId(index);
        self.name_to_id.insert(def.name.clone(), id);
        self.categories.push(def);
        Ok(id)
    }

    /// Returns the definition for `id`, or `None` if it was not issued by this registry.
    pub fn get(&self, id: CategoryId) -> Option<&CategoryDef> {
        self.categories.get(id.0 as usize)
    }

    /// Looks up a category ID by name.
    pub fn lookup_by_name(&self, name: &str) -> Option<CategoryId> {
        self.name_to_id.get(name).copied()
    }

    /// Iterates `(id, def)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryId, &CategoryDef)> {
        self.categories
            .iter()
            .enumerate()
            .map(|(i, def)| (CategoryId(i as u16), def))
    }

    /// Returns the number of registered categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns `true` if no categories are registered.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_assigns_sequential_ids() {
        let mut reg = CategoryRegistry::new();
        let water = reg
            .register(CategoryDef::new("water", (20, 50, 180), '~'))
            .unwrap();
        let land = reg
            .register(CategoryDef::new("land", (100, 180, 60), '.'))
            .unwrap();
        assert_eq!(water, CategoryId(0));
        assert_eq!(land, CategoryId(1));
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.get(land).map(|d| d.glyph), Some('.'));
    }

    #[test]
    fn test_lookup_by_name() {
        let mut reg = CategoryRegistry::new();
        let sand = reg
            .register(CategoryDef::new("sand", (220, 200, 130), ':'))
            .unwrap();
        assert_eq!(reg.lookup_by_name("sand"), Some(sand));
        assert_eq!(reg.lookup_by_name("lava"), None);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut reg = CategoryRegistry::new();
        reg.register(CategoryDef::new("desert", (1, 2, 3), 'd'))
            .unwrap();
        let result = reg.register(CategoryDef::new("desert", (4, 5, 6), 'D'));
        assert_eq!(
            result,
            Err(CategoryRegistryError::DuplicateName("desert".into()))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_unknown_id_is_none() {
        let reg = CategoryRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.get(CategoryId(3)).is_none());
    }

    #[test]
    fn test_iter_in_registration_order() {
        let mut reg = CategoryRegistry::new();
        for name in ["a", "b", "c"] {
            reg.register(CategoryDef::new(name, (0, 0, 0), '#')).unwrap();
        }
        let names: Vec<&str> = reg.iter().map(|(_, d)| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
