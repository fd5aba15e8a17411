//! Resultados esperados de los pedidos y de los cambios al menu.
//! No son errores: se le devuelven a quien hizo el pedido.
use std::fmt;

/// Motivo por el que no se preparo una bebida
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrewRejection {
    UnknownBeverage,
    InsufficientIngredient(String),
    AllOutletsBusy,
    OutletWaitTimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrewOutcome {
    Prepared { beverage: String },
    Rejected { beverage: String, reason: BrewRejection },
}

impl BrewOutcome {
    pub fn is_prepared(&self) -> bool {
        matches!(self, BrewOutcome::Prepared { .. })
    }

    pub fn rejection(&self) -> Option<&BrewRejection> {
        match self {
            BrewOutcome::Prepared { .. } => None,
            BrewOutcome::Rejected { reason, .. } => Some(reason),
        }
    }
}

impl fmt::Display for BrewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrewOutcome::Prepared { beverage } => write!(f, "{} is prepared", beverage),
            BrewOutcome::Rejected { beverage, reason } => match reason {
                BrewRejection::UnknownBeverage => {
                    write!(f, "This Beverage is not present at the moment")
                }
                BrewRejection::InsufficientIngredient(ingredient) => write!(
                    f,
                    "{} cannot be prepared because item {} is not sufficient",
                    beverage, ingredient
                ),
                BrewRejection::AllOutletsBusy => {
                    write!(f, "All outlets are busy, kindly wait for your turn")
                }
                BrewRejection::OutletWaitTimedOut => write!(
                    f,
                    "{} cannot be prepared because no outlet was free in time",
                    beverage
                ),
            },
        }
    }
}

/// Motivo por el que no se modifico el menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRejection {
    DuplicateBeverage,
    UnsupportedRecipe,
    UnknownBeverageOnRemove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Added,
    Removed,
    Rejected(MenuRejection),
}

impl MenuOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, MenuOutcome::Rejected(_))
    }
}

impl fmt::Display for MenuOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuOutcome::Added => write!(f, "Beverage added successfully"),
            MenuOutcome::Removed => write!(f, "Beverage removed successfully"),
            MenuOutcome::Rejected(MenuRejection::DuplicateBeverage) => {
                write!(f, "This Beverage is already present")
            }
            MenuOutcome::Rejected(MenuRejection::UnsupportedRecipe) => {
                write!(f, "Pantry does not provide the specified ingredients")
            }
            MenuOutcome::Rejected(MenuRejection::UnknownBeverageOnRemove) => {
                write!(f, "This Beverage is not present")
            }
        }
    }
}
