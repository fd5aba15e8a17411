//! Lectura de la configuracion de la cafetera desde un JSON
use log::{debug, error};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::CoffeeMakerError;
use crate::outlets::AdmissionPolicy;
use crate::recipe::{IngredientRequirement, Recipe};

#[derive(Deserialize, Debug)]
pub struct MachineConfiguration {
    pub machine: Machine,
}

#[derive(Deserialize, Debug)]
pub struct OutletsConfiguration {
    pub count_n: usize,
}

/// Ingredientes de una receta en el orden en que aparecen en el JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIngredients(pub Vec<(String, u64)>);

impl<'de> Deserialize<'de> for RecipeIngredients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecipeIngredientsVisitor)
    }
}

struct RecipeIngredientsVisitor;

impl<'de> Visitor<'de> for RecipeIngredientsVisitor {
    type Value = RecipeIngredients;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from ingredient to quantity")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut ingredients = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, quantity)) = access.next_entry::<String, u64>()? {
            ingredients.push((name, quantity));
        }
        Ok(RecipeIngredients(ingredients))
    }
}

/// Descripcion de la cafetera: dispensers, ingredientes iniciales y bebidas.
/// Cada receta mantiene el orden de sus ingredientes en el JSON.
#[derive(Deserialize, Debug)]
pub struct Machine {
    pub outlets: OutletsConfiguration,
    pub total_items_quantity: BTreeMap<String, u64>,
    pub beverages: BTreeMap<String, RecipeIngredients>,
    #[serde(default)]
    pub admission: AdmissionPolicy,
    #[serde(default)]
    pub brew_time_in_ms: u64,
}

impl Machine {
    pub fn recipes(&self) -> Result<Vec<(String, Recipe)>, CoffeeMakerError> {
        self.beverages
            .iter()
            .map(|(beverage, ingredients)| -> Result<(String, Recipe), CoffeeMakerError> {
                let requirements = ingredients
                    .0
                    .iter()
                    .map(|(name, quantity)| IngredientRequirement::new(name, *quantity))
                    .collect();
                Ok((beverage.clone(), Recipe::new(requirements)?))
            })
            .collect()
    }
}

pub fn parse_configuration(json: &str) -> Result<MachineConfiguration, CoffeeMakerError> {
    serde_json::from_str(json).map_err(|err| {
        error!("[CONFIG] Invalid machine configuration: {}", err);
        CoffeeMakerError::InvalidConfiguration(err.to_string())
    })
}

pub fn read_configuration_from_file<P: AsRef<Path>>(
    path: P,
) -> Result<MachineConfiguration, CoffeeMakerError> {
    let file = File::open(&path).map_err(|err| {
        error!(
            "[CONFIG] Could not open {}: {}",
            path.as_ref().display(),
            err
        );
        CoffeeMakerError::FileReaderError
    })?;
    let reader = BufReader::new(file);
    let configuration: MachineConfiguration = serde_json::from_reader(reader).map_err(|err| {
        error!("[CONFIG] Invalid machine configuration: {}", err);
        CoffeeMakerError::InvalidConfiguration(err.to_string())
    })?;
    debug!(
        "[CONFIG] Read configuration with {} outlets and {} beverages",
        configuration.machine.outlets.count_n,
        configuration.machine.beverages.len()
    );
    Ok(configuration)
}
