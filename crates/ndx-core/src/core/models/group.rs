use crate::core::utils::natural::natural_cmp;
use std::collections::HashMap;

/// Named groups of atom-number strings, the unit written to an index file.
///
/// Group order is not stored; [`Groups::iter_ordered`] yields groups in natural order of
/// their names. Member order inside a group is kept as inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Groups {
    entries: HashMap<String, Vec<String>>,
}

impl Groups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a group, returning the members of a previous group with the same name.
    pub fn insert(&mut self, name: String, members: Vec<String>) -> Option<Vec<String>> {
        self.entries.insert(name, members)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Group names in natural order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    pub fn iter_ordered(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.names()
            .into_iter()
            .map(|name| (name, self.entries[name].as_slice()))
    }

    /// Total number of members across all groups.
    pub fn member_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for Groups {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn iter_ordered_yields_groups_in_natural_order() {
        let mut groups = Groups::new();
        groups.insert("SOL12".into(), members(&["40"]));
        groups.insert("SOL2".into(), members(&["4"]));
        groups.insert("NAION".into(), members(&[]));

        let names: Vec<&str> = groups.iter_ordered().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["NAION", "SOL2", "SOL12"]);
    }

    #[test]
    fn members_keep_insertion_order() {
        let mut groups = Groups::new();
        groups.insert("SOLOW".into(), members(&["9", "1", "5"]));
        assert_eq!(groups.get("SOLOW"), Some(&members(&["9", "1", "5"])[..]));
    }

    #[test]
    fn insert_reports_replaced_group() {
        let mut groups = Groups::new();
        assert!(groups.insert("A".into(), members(&["1"])).is_none());
        assert_eq!(groups.insert("A".into(), members(&["2"])), Some(members(&["1"])));
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn member_count_sums_all_groups() {
        let groups: Groups = vec![
            ("A".to_string(), members(&["1", "2"])),
            ("B".to_string(), members(&["3"])),
        ]
        .into_iter()
        .collect();
        assert_eq!(groups.member_count(), 3);
    }
}
