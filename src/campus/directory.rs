// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::Location;

/// Errors which may occur when loading a custom [ClassroomDirectory].
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("classroom directory: {0}")]
    Json(#[from] serde_json::Error),

    #[error("classroom directory: empty room name")]
    EmptyName,
}

/// Static lookup table from room names to their [Locations](Location).
///
/// Names are case-insensitive; they are stored upper-cased.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClassroomDirectory(BTreeMap<String, Location>);

impl ClassroomDirectory {
    /// Returns the directory of the main campus.
    pub fn campus() -> Self {
        let mut d = Self::default();
        for &(name, lat, lon, floor) in CAMPUS {
            d.insert(name, Location::new(floor, lat, lon));
        }
        d
    }

    /// Parses a directory from a JSON object mapping room names
    /// to `{"lat": ..., "lng": ..., "flr": ...}` objects.
    pub fn from_json(s: &str) -> Result<Self, DirectoryError> {
        let raw: BTreeMap<String, Location> = serde_json::from_str(s)?;
        let mut d = Self::default();
        for (name, location) in raw {
            if name.trim().is_empty() {
                return Err(DirectoryError::EmptyName);
            }
            d.insert(&name, location);
        }
        Ok(d)
    }

    /// Returns the number of rooms in the directory.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Creates or replaces a room.
    pub fn insert(&mut self, name: &str, location: Location) {
        self.0.insert(normalize(name), location);
    }

    /// Finds a room by its case-insensitive name.
    pub fn lookup(&self, name: &str) -> Option<&Location> {
        self.0.get(&normalize(name))
    }

    /// Returns an iterator over all (upper-cased) room names and their locations.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Location)> {
        self.0.iter().map(|(name, location)| (name.as_str(), location))
    }
}

/// Returns the canonical form of a room name.
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

#[rustfmt::skip]
const CAMPUS: &[(&str, f64, f64, &str)] = &[
    ("NLHC-1", 25.492956019166098, 81.86301248174878, "Ground"),
    ("NLHC-2", 25.492956019166098, 81.86301248174878, "First"),
    ("GW-1", 25.493910, 81.862972, "Ground"),
    ("GW-2", 25.493888, 81.862958, "Ground"),
    ("GW-3", 25.493843, 81.863025, "Ground"),
    ("GW-4", 25.493825, 81.862967, "Ground"),
    ("GW-5", 25.493910, 81.862972, "Ground"),
    ("GW-6", 25.493772, 81.863024, "Ground"),
    ("GW-7", 25.493747, 81.862953, "Ground"),
    ("GW-8", 25.493726, 81.863026, "Ground"),
    ("GW-9", 25.493705, 81.862955, "Ground"),
    ("GW-10", 25.493695, 81.863030, "Ground"),
    ("GW-11", 25.493662, 81.862957, "Ground"),
    ("GW-12", 25.493639, 81.863029, "Ground"),
    ("GS-3", 25.492836, 81.8634907, "Ground"),
    ("GS-4", 25.4927201, 81.8635792, "Ground"),
    ("GS-5", 25.4928279, 81.8632600, "Ground"),
    ("GS-6", 25.492735, 81.863148, "Ground"),
    ("GS-7", 25.492829, 81.863045, "Ground"),
    ("GS-8", 25.492736, 81.863122, "Ground"),
    ("FW-3", 25.493843, 81.863025, "First"),
    ("FW-4", 25.493825, 81.862967, "First"),
    ("FW-5", 25.493910, 81.862972, "First"),
    ("FW-6", 25.493772, 81.863024, "First"),
    ("FEW-15", 25.493514, 81.863178, "First"),
    ("FEW-1", 25.493499, 81.863555, "First"),
    ("SEW-1", 25.493514, 81.863178, "Second"),
    ("SEW-7", 25.493499, 81.863555, "Second"),
    ("SEW-8", 25.493441, 81.863072, "Second"),
    ("SEW-9", 25.493500, 81.8630151, "Second"),
    ("SEW-10", 25.493439, 81.862974, "Second"),
    ("FN-1", 25.49399067, 81.8643610, "First"),
    ("FN-3", 25.49399426, 81.8642481, "First"),
    ("FN-4", 25.49399713, 81.86408672, "First"),
    ("FE-16", 25.4928895, 81.864410, "First"),
    ("FE-17", 25.492831694, 81.8644067, "First"),
    ("FE-18", 25.492746441, 81.8644151, "First"),
    ("FC-1", 25.49318640529978, 81.86372195238, "First"),
    ("DESIGN CENTRE", 25.492028084635727, 81.86198122698214, "Ground"),
    ("IGNOU LAB", 25.491853294751916, 81.86201651294077, "Ground"),
    ("SOFTWARE TESTING LAB", 25.491978376955426, 81.8618226977062, "Ground"),
    ("IMAGE PROCESSING LAB", 25.492063585871996, 81.8618301896995, "First"),
    ("COMPUTER VISION LAB", 25.492063585871996, 81.8618301896995, "First"),
    ("MICROPROCESSOR LAB", 25.4920635858, 81.861830189, "First"),
    ("INFORMATION SECURITY LAB", 25.491978376955426, 81.8618226977062, "First"),
    ("LHC-2", 25.49168487911367, 81.86224075093176, "Ground"),
    ("LHC-3", 25.491663238691423, 81.86237111161502, "Ground"),
    ("LHC-4", 25.491835009435633, 81.862375606811, "Ground"),
    ("LHC-5", 25.49168487911367, 81.86224075093176, "First"),
    ("LHC-6", 25.491663238691423, 81.86237111161502, "First"),
    ("LHC-7", 25.491835009435633, 81.862375606811, "First"),
    ("LHC-8", 25.491835009435633, 81.862375606811, "First"),
    ("VERIFICATION AND VALIDATION LAB", 25.49130346213559, 81.86326739819306, "First"),
    ("COMPUTER CENTRE", 25.491666626230366, 81.86314871042447, "Ground"),
    ("COMPUTING LAB", 25.49130346213559, 81.86326739819306, "First"),
    ("DATA MINING LAB", 25.491318593994503, 81.86348532765743, "Ground"),
    ("COMPUTER NETWORKING LAB", 25.491338568045354, 81.86348532765743, "First"),
    ("NB-1", 25.49112482368182, 81.8634898610995, "Ground"),
    ("NB-2", 25.49112482368182, 81.8634898610995, "First"),
    ("DISTRIBUTED COMPUTING LAB", 25.491184352591855, 81.8634940262944, "First"),
    ("COMPUTER SCIENCE DEPARTMENT", 25.491187434370417, 81.86340693424737, "Ground"),
    ("CC-1", 25.49158328355494, 81.86314340723351, "First"),
    ("CC-2", 25.49158328355494, 81.86314340723351, "Second"),
    ("RCG", 25.49158328355494, 81.86314340723351, "Ground"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coordinate;

    #[test]
    fn campus_lookup_is_case_insensitive() {
        let d = ClassroomDirectory::campus();
        let l = d.lookup("lhc-2").unwrap();
        assert_eq!(l.floor, "Ground");
        assert_eq!(l.at, Coordinate::new(25.49168487911367, 81.86224075093176));

        assert_eq!(d.lookup(" Computer Vision Lab "), d.lookup("COMPUTER VISION LAB"));
        assert!(d.lookup("LHC-99").is_none());
    }

    #[test]
    fn from_json() {
        let d = ClassroomDirectory::from_json(
            r#"{
                "lab-1": {"lat": 25.49, "lng": 81.86, "flr": "Ground"},
                "Lab-2": {"lat": 25.50, "lon": 81.87, "floor": "First"}
            }"#,
        )
        .unwrap();

        assert_eq!(d.len(), 2);
        assert_eq!(d.lookup("LAB-1"), Some(&Location::new("Ground", 25.49, 81.86)));
        assert_eq!(d.lookup("lab-2"), Some(&Location::new("First", 25.50, 81.87)));
        assert_eq!(
            d.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["LAB-1", "LAB-2"]
        );
    }

    #[test]
    fn from_json_errors() {
        assert!(matches!(
            ClassroomDirectory::from_json(r#"{" ": {"lat": 1, "lng": 2, "flr": "Ground"}}"#),
            Err(DirectoryError::EmptyName)
        ));
        assert!(matches!(
            ClassroomDirectory::from_json(r#"{"A": {"lat": 1}}"#),
            Err(DirectoryError::Json(_))
        ));
    }
}
