use serde::Serialize;
use crate::catalog::PlanetRecord;

/// Text panel contents, serialized to JSON for the host page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    /// Display name: whatever the user typed, uppercased.
    pub name: String,
    pub desc: String,
    pub temp: String,
    pub moons: u32,
    pub distance: String,
    pub diameter: String,
    /// Catalog index, for hosts that highlight a list entry.
    pub index: usize,
}

impl InfoPanel {
    pub fn new(typed_name: &str, index: usize, record: &PlanetRecord) -> Self {
        Self {
            name: typed_name.trim().to_uppercase(),
            desc: record.desc.clone(),
            temp: record.temp.clone(),
            moons: record.moons,
            distance: record.distance.clone(),
            diameter: record.diameter.clone(),
            index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PlanetCatalog;

    #[test]
    fn name_is_uppercased_input() {
        let catalog = PlanetCatalog::load().unwrap();
        let record = catalog.lookup("mars").unwrap();
        let panel = InfoPanel::new(" mArs", 3, record);
        assert_eq!(panel.name, "MARS");
        assert_eq!(panel.moons, 2);
        assert_eq!(panel.temp, "-65°C");
    }

    #[test]
    fn serializes_all_fields() {
        let catalog = PlanetCatalog::load().unwrap();
        let panel = InfoPanel::new("earth", 2, catalog.lookup("earth").unwrap());
        let json: serde_json::Value = serde_json::to_value(&panel).unwrap();
        assert_eq!(json["name"], "EARTH");
        assert_eq!(json["moons"], 1);
        assert_eq!(json["index"], 2);
        assert!(json["desc"].as_str().unwrap().starts_with("Our home planet"));
    }
}
