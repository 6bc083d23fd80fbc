//! Species vocabulary used to segment dosage blocks.
//!
//! Names are kept longest first so that compound labels ("Dogs and Cats")
//! win over the single species they end with ("Cats").

/// Characters that may separate a leading species name from its instruction.
const PREFIX_SEPARATORS: &[char] = &[':', '-', '–', ',', '.'];

/// Ordered list of recognized species and species-group names.
#[derive(Debug, Clone)]
pub struct SpeciesVocabulary {
    names: Vec<String>,
}

impl Default for SpeciesVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeciesVocabulary {
    /// Create a vocabulary with the default species list.
    pub fn new() -> Self {
        let mut names: Vec<String> = Self::default_species()
            .iter()
            .map(|s| s.to_string())
            .collect();
        names.sort_by_key(|n| std::cmp::Reverse(n.chars().count()));
        Self { names }
    }

    /// Create a vocabulary with no species at all.
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Names in match order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Add a custom species name. Duplicates (ignoring case) are skipped.
    pub fn add_species(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return;
        }
        let len = name.chars().count();
        let pos = self
            .names
            .iter()
            .position(|n| n.chars().count() < len)
            .unwrap_or(self.names.len());
        self.names.insert(pos, name.to_string());
    }

    /// Check if a name is known (ignoring case).
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n.eq_ignore_ascii_case(name))
    }

    /// Find a species name glued onto the end of `text`.
    ///
    /// Matching is case-sensitive and the name must start the string or
    /// follow whitespace or a period. Returns the name and the text before it.
    pub fn match_suffix<'t>(&self, text: &'t str) -> Option<(&str, &'t str)> {
        self.names.iter().find_map(|name| {
            let head = text.strip_suffix(name.as_str())?;
            let bounded =
                head.is_empty() || head.ends_with(char::is_whitespace) || head.ends_with('.');
            bounded.then_some((name.as_str(), head.trim_end()))
        })
    }

    /// Check if `text` is nothing but a species name, ignoring case and a
    /// trailing period.
    pub fn match_header(&self, text: &str) -> Option<&str> {
        let text = text.trim();
        let text = text.strip_suffix('.').unwrap_or(text).trim_end();
        self.names
            .iter()
            .find(|n| n.eq_ignore_ascii_case(text))
            .map(String::as_str)
    }

    /// Find a species name at the start of `text`, ignoring case.
    ///
    /// Returns the canonical name and the remaining instruction with leading
    /// separators removed.
    pub fn match_prefix<'t>(&self, text: &'t str) -> Option<(&str, &'t str)> {
        self.names.iter().find_map(|name| {
            let head = text.get(..name.len())?;
            if !head.eq_ignore_ascii_case(name) {
                return None;
            }
            let rest = &text[name.len()..];
            let bounded = rest
                .chars()
                .next()
                .map_or(true, |c| c.is_whitespace() || PREFIX_SEPARATORS.contains(&c));
            bounded.then(|| {
                let rest = rest.trim_start_matches(|c: char| {
                    c.is_whitespace() || PREFIX_SEPARATORS.contains(&c)
                });
                (name.as_str(), rest)
            })
        })
    }

    /// Default species list.
    fn default_species() -> &'static [&'static str] {
        &[
            // Mixed groups
            "Dogs and Cats",
            "Dogs & Cats",
            "Cats and Dogs",
            "Horses and Cattle",
            "Cattle and Horses",
            "Sheep and Goats",
            "Small Ruminants",
            "Small Mammals",
            "Small Animals",
            "Large Animals",
            "Food Animals",
            "Exotic Animals",
            // Companion animals
            "Dogs",
            "Cats",
            "Canine",
            "Feline",
            "Puppies",
            "Kittens",
            // Large animals
            "Horses",
            "Equine",
            "Foals",
            "Cattle",
            "Bovine",
            "Calves",
            "Ruminants",
            "Sheep",
            "Goats",
            "Pigs",
            "Swine",
            "Camelids",
            // Exotics
            "Ferrets",
            "Rabbits",
            "Rodents",
            "Birds",
            "Poultry",
            "Reptiles",
            "Exotics",
        ]
    }
}
