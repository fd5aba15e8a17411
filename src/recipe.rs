//! Recetas de las bebidas
use std::collections::HashSet;

use crate::errors::CoffeeMakerError;

/// Cantidad que necesita una receta de un ingrediente
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRequirement {
    pub name: String,
    pub quantity: u64,
}

impl IngredientRequirement {
    pub fn new(name: &str, quantity: u64) -> IngredientRequirement {
        IngredientRequirement {
            name: name.to_string(),
            quantity,
        }
    }
}

/// Receta de una bebida. Mantiene el orden en que se definieron los ingredientes,
/// que es el orden en que se verifican contra la despensa.
/// No puede tener dos veces el mismo ingrediente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    requirements: Vec<IngredientRequirement>,
}

impl Recipe {
    pub fn new(requirements: Vec<IngredientRequirement>) -> Result<Recipe, CoffeeMakerError> {
        let mut seen = HashSet::new();
        for requirement in &requirements {
            if !seen.insert(requirement.name.as_str()) {
                return Err(CoffeeMakerError::DuplicateIngredient(
                    requirement.name.clone(),
                ));
            }
        }
        Ok(Recipe { requirements })
    }

    /// Arma la receta a partir de pares (ingrediente, cantidad)
    pub fn from_pairs(pairs: &[(&str, u64)]) -> Result<Recipe, CoffeeMakerError> {
        Recipe::new(
            pairs
                .iter()
                .map(|(name, quantity)| IngredientRequirement::new(name, *quantity))
                .collect(),
        )
    }

    pub fn requirements(&self) -> &[IngredientRequirement] {
        &self.requirements
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
