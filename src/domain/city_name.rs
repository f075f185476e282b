// City name directory - spelling correction against known delivery cities
use serde::Serialize;

pub const DEFAULT_MATCH_CUTOFF: f64 = 0.6;

pub const DEFAULT_KNOWN_CITIES: [&str; 20] = [
    "Barcelona",
    "Madrid",
    "Valencia",
    "Sevilla",
    "Zaragoza",
    "Málaga",
    "Murcia",
    "Palma",
    "Bilbao",
    "Alicante",
    "Córdoba",
    "Valladolid",
    "Vigo",
    "Gijón",
    "Granada",
    "A Coruña",
    "Santander",
    "Oviedo",
    "Pamplona",
    "Logroño",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCity {
    pub name: String,
    /// The caller's spelling when it was replaced by a known city.
    pub corrected_from: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CityDirectory {
    cities: Vec<String>,
    cutoff: f64,
}

impl CityDirectory {
    pub fn new<I>(cities: I, cutoff: f64) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut known: Vec<String> = Vec::new();
        for city in cities {
            let city = city.as_ref().trim();
            if !city.is_empty() && !known.iter().any(|k| k.to_lowercase() == city.to_lowercase()) {
                known.push(city.to_string());
            }
        }
        Self { cities: known, cutoff }
    }

    /// Map `input` onto the closest known city.
    ///
    /// A case-insensitive exact hit returns the canonical spelling without
    /// flagging a correction. Otherwise the best normalized Levenshtein
    /// similarity at or above the cutoff wins, earlier entries breaking ties.
    /// Anything else is passed through trimmed.
    pub fn resolve(&self, input: &str) -> ResolvedCity {
        let trimmed = input.trim();
        let needle = trimmed.to_lowercase();
        if needle.is_empty() {
            return ResolvedCity {
                name: String::new(),
                corrected_from: None,
            };
        }

        if let Some(exact) = self.cities.iter().find(|c| c.to_lowercase() == needle) {
            return ResolvedCity {
                name: exact.clone(),
                corrected_from: None,
            };
        }

        let best = self
            .cities
            .iter()
            .map(|c| (c, strsim::normalized_levenshtein(&needle, &c.to_lowercase())))
            .fold(None::<(&String, f64)>, |best, (city, score)| match best {
                Some((_, top)) if top >= score => best,
                _ => Some((city, score)),
            });

        match best {
            Some((city, score)) if score >= self.cutoff => {
                tracing::debug!("Corrected city '{}' to '{}' (score {:.2})", trimmed, city, score);
                ResolvedCity {
                    name: city.clone(),
                    corrected_from: Some(trimmed.to_string()),
                }
            }
            _ => ResolvedCity {
                name: trimmed.to_string(),
                corrected_from: None,
            },
        }
    }
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWN_CITIES, DEFAULT_MATCH_CUTOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misspelling_is_corrected() {
        let resolved = CityDirectory::default().resolve("Barcelna");
        assert_eq!(resolved.name, "Barcelona");
        assert_eq!(resolved.corrected_from.as_deref(), Some("Barcelna"));

        let resolved = CityDirectory::default().resolve(" zaragosa ");
        assert_eq!(resolved.name, "Zaragoza");
        assert_eq!(resolved.corrected_from.as_deref(), Some("zaragosa"));
    }

    #[test]
    fn test_exact_match_ignores_case_without_correction() {
        let resolved = CityDirectory::default().resolve("  mADRID ");
        assert_eq!(
            resolved,
            ResolvedCity {
                name: "Madrid".to_string(),
                corrected_from: None,
            }
        );
    }

    #[test]
    fn test_missing_accent_maps_to_canonical_name() {
        let resolved = CityDirectory::default().resolve("Malaga");
        assert_eq!(resolved.name, "Málaga");
        assert!(resolved.corrected_from.is_some());
    }

    #[test]
    fn test_unrelated_name_passes_through() {
        let resolved = CityDirectory::default().resolve(" Tokyo ");
        assert_eq!(resolved.name, "Tokyo");
        assert!(resolved.corrected_from.is_none());
        assert_eq!(CityDirectory::default().resolve("  ").name, "");
    }

    #[test]
    fn test_custom_directory_dedupes() {
        let directory = CityDirectory::new(["Lisboa", "lisboa", "Porto", ""], 0.6);
        assert_eq!(directory.cities, vec!["Lisboa".to_string(), "Porto".to_string()]);
        assert_eq!(directory.resolve("Lisbon").name, "Lisboa");
    }
}
