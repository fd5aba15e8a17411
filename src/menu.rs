//! Menu de bebidas de la cafetera
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use crate::{errors::CoffeeMakerError, recipe::Recipe};

/// Bebida -> receta. Las altas y bajas toman el lock de escritura, por lo que
/// quien busca una receta ve el menu de antes o de despues, nunca uno a medio armar.
pub struct BeverageMenu {
    beverages: RwLock<HashMap<String, Arc<Recipe>>>,
}

impl BeverageMenu {
    pub fn new() -> BeverageMenu {
        BeverageMenu {
            beverages: RwLock::new(HashMap::new()),
        }
    }

    pub fn recipe(&self, name: &str) -> Result<Option<Arc<Recipe>>, CoffeeMakerError> {
        Ok(self.beverages.read()?.get(name).cloned())
    }

    pub fn contains(&self, name: &str) -> Result<bool, CoffeeMakerError> {
        Ok(self.beverages.read()?.contains_key(name))
    }

    /// Agrega la bebida si no estaba. Devuelve si se agrego.
    pub fn insert(&self, name: &str, recipe: Recipe) -> Result<bool, CoffeeMakerError> {
        let mut beverages = self.beverages.write()?;
        if beverages.contains_key(name) {
            return Ok(false);
        }
        beverages.insert(name.to_string(), Arc::new(recipe));
        Ok(true)
    }

    /// Saca la bebida si estaba. Devuelve si se saco.
    pub fn remove(&self, name: &str) -> Result<bool, CoffeeMakerError> {
        Ok(self.beverages.write()?.remove(name).is_some())
    }

    /// Nombres de las bebidas, ordenados
    pub fn beverages(&self) -> Result<Vec<String>, CoffeeMakerError> {
        let mut names: Vec<String> = self.beverages.read()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn clear(&self) -> Result<(), CoffeeMakerError> {
        self.beverages.write()?.clear();
        Ok(())
    }
}

impl Default for BeverageMenu {
    fn default() -> Self {
        BeverageMenu::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tea() -> Recipe {
        Recipe::from_pairs(&[("hot_water", 200), ("tea_leaves", 30)]).unwrap()
    }

    #[test]
    fn should_create_an_empty_menu() {
        let menu = BeverageMenu::new();
        assert_eq!(true, menu.beverages().unwrap().is_empty());
    }

    #[test]
    fn should_insert_a_beverage_only_once() {
        let menu = BeverageMenu::new();
        assert_eq!(true, menu.insert("tea", tea()).unwrap());
        assert_eq!(false, menu.insert("tea", Recipe::new(Vec::new()).unwrap()).unwrap());
        assert_eq!(tea(), *menu.recipe("tea").unwrap().unwrap());
    }

    #[test]
    fn should_remove_a_beverage_only_if_present() {
        let menu = BeverageMenu::new();
        menu.insert("tea", tea()).unwrap();
        assert_eq!(true, menu.remove("tea").unwrap());
        assert_eq!(false, menu.remove("tea").unwrap());
        assert_eq!(true, menu.recipe("tea").unwrap().is_none());
    }

    #[test]
    fn should_list_the_beverages_sorted() {
        let menu = BeverageMenu::new();
        menu.insert("latte", tea()).unwrap();
        menu.insert("espresso", tea()).unwrap();
        assert_eq!(
            vec![String::from("espresso"), String::from("latte")],
            menu.beverages().unwrap()
        );
    }

    #[test]
    fn should_keep_a_looked_up_recipe_after_removal() {
        let menu = BeverageMenu::new();
        menu.insert("tea", tea()).unwrap();
        let recipe = menu.recipe("tea").unwrap().unwrap();
        menu.clear().unwrap();
        assert_eq!(false, menu.contains("tea").unwrap());
        assert_eq!(tea(), *recipe);
    }
}
