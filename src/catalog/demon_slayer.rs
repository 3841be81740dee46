//! Built-in vocabulary for Demon Slayer season 1: the fixed cast the
//! extraction is constrained to, plus the Korean display names.

use super::{CatalogEntry, EntityCatalog, NameLocalizer};

/// The season-1 cast as the closed extraction vocabulary.
pub fn catalog() -> EntityCatalog {
    let entries = [
        ("N0", "person", "Tanjiro Kamado"),
        ("N1", "person", "Nezuko Kamado"),
        ("N2", "person", "Giyu Tomioka"),
        ("N3", "person", "Sakonji Urokodaki"),
        ("N4", "person", "Sabito"),
        ("N5", "person", "Makomo"),
        ("N6", "person", "Zenitsu Agatsuma"),
        ("N7", "person", "Inosuke Hashibira"),
        ("N8", "person", "Kanao Tsuyuri"),
        ("N9", "person", "Kyojuro Rengoku"),
        ("N10", "person", "Kagaya Ubuyashiki"),
        ("N11", "person", "Shinobu Kocho"),
        ("N12", "person", "Sanemi Shinazugawa"),
        ("N13", "demon", "Muzan Kibutsuji"),
        ("N14", "demon", "Susamaru"),
        ("N15", "demon", "Yahaba"),
        ("N16", "demon", "Kyogai"),
        ("N17", "demon", "Rui"),
        ("N18", "demon", "Enmu"),
    ]
    .into_iter()
    .map(|(id, label, name)| CatalogEntry {
        id: id.to_string(),
        label: label.to_string(),
        name: name.to_string(),
    })
    .collect();

    EntityCatalog::new(entries)
}

/// Korean display names for the season-1 cast.
pub fn korean_names() -> NameLocalizer {
    NameLocalizer::from_pairs([
        ("Tanjiro Kamado", "카마도 탄지로"),
        ("Nezuko Kamado", "카마도 네즈코"),
        ("Giyu Tomioka", "토미오카 기유"),
        ("Sakonji Urokodaki", "우로코다키 사콘지"),
        ("Sabito", "사비토"),
        ("Makomo", "마코모"),
        ("Zenitsu Agatsuma", "아가츠마 젠이츠"),
        ("Inosuke Hashibira", "하시비라 이노스케"),
        ("Kanao Tsuyuri", "츠유리 카나오"),
        ("Kyojuro Rengoku", "렌고쿠 쿄쥬로"),
        ("Kagaya Ubuyashiki", "우부야시키 카가야"),
        ("Shinobu Kocho", "코쵸우 시노부"),
        ("Sanemi Shinazugawa", "시나즈가와 사네미"),
        ("Muzan Kibutsuji", "키부츠지 무잔"),
        ("Susamaru", "스사마루"),
        ("Yahaba", "야하바"),
        ("Kyogai", "쿄우가이"),
        ("Rui", "루이"),
        ("Enmu", "엔무"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyValue;

    #[test]
    fn test_catalog_has_nineteen_entries_with_unique_ids() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 19);

        let mut ids: Vec<&str> = catalog.entries().iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 19);
    }

    #[test]
    fn test_catalog_labels_are_person_or_demon() {
        for entry in catalog().entries() {
            assert!(
                entry.label == "person" || entry.label == "demon",
                "unexpected label {}",
                entry.label
            );
        }
    }

    #[test]
    fn test_every_catalog_name_has_a_korean_display_form() {
        let localizer = korean_names();
        for entry in catalog().entries() {
            let mut node = entry.to_node();
            localizer.localize_node(&mut node);
            let props = node.properties.expect("catalog nodes carry a name");
            let Some(PropertyValue::Text(name)) = props.get("name") else {
                panic!("name property missing for {}", entry.id);
            };
            assert_ne!(
                name, &entry.name,
                "{} was not localized",
                entry.name
            );
        }
    }
}
