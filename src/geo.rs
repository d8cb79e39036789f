//! Country boundaries for the choropleth.
//!
//! Boundaries come from a GeoJSON FeatureCollection. Each feature is keyed
//! by its name property; the exterior ring of every polygon becomes patch
//! coordinates, with polygon parts separated by a `None` break.

use crate::constants::BOUNDARY_NAME_PROPERTIES;
use crate::error::{DashboardError, Result};
use geojson::{Feature, GeoJson, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Outline of one country as patch coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub name: String,
    pub xs: Vec<Option<f64>>,
    pub ys: Vec<Option<f64>>,
}

impl CountryShape {
    /// Country without geometry
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xs: Vec::new(),
            ys: Vec::new(),
        }
    }

    pub fn has_geometry(&self) -> bool {
        !self.xs.is_empty()
    }
}

/// Ordered country outlines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Boundaries {
    shapes: Vec<CountryShape>,
}

impl Boundaries {
    pub fn new(shapes: Vec<CountryShape>) -> Self {
        Self { shapes }
    }

    /// Read a GeoJSON FeatureCollection
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| DashboardError::Boundaries {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let geojson = GeoJson::from_reader(BufReader::new(file))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(DashboardError::Boundaries {
                path: path.to_path_buf(),
                reason: "expected a FeatureCollection".to_string(),
            });
        };

        let total = collection.features.len();
        let shapes: Vec<CountryShape> = collection.features.iter().filter_map(shape_of).collect();
        if shapes.len() < total {
            debug!(
                "Skipped {} boundary features without a name property",
                total - shapes.len()
            );
        }

        info!("Loaded {} country boundaries from {}", shapes.len(), path.display());
        Ok(Self::new(shapes))
    }

    /// Shape-less entries, one per name, for running without a boundary file
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(CountryShape::named).collect())
    }

    pub fn shapes(&self) -> &[CountryShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }
}

fn feature_name(feature: &Feature) -> Option<String> {
    BOUNDARY_NAME_PROPERTIES
        .iter()
        .find_map(|key| feature.property(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn shape_of(feature: &Feature) -> Option<CountryShape> {
    let mut shape = CountryShape::named(feature_name(feature)?);

    let rings: Vec<&Vec<Vec<f64>>> = match feature.geometry.as_ref().map(|g| &g.value) {
        Some(Value::Polygon(rings)) => rings.first().into_iter().collect(),
        Some(Value::MultiPolygon(polygons)) => {
            polygons.iter().filter_map(|rings| rings.first()).collect()
        }
        _ => Vec::new(),
    };

    for (i, ring) in rings.into_iter().enumerate() {
        if i > 0 {
            shape.xs.push(None);
            shape.ys.push(None);
        }
        for position in ring {
            if let [x, y, ..] = position.as_slice() {
                shape.xs.push(Some(*x));
                shape.ys.push(Some(*y));
            }
        }
    }

    Some(shape)
}
