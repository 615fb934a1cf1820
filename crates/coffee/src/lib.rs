//! Coffee-shop drink catalog records.

pub mod drink;

pub use drink::{
    Drink, DrinkPatch, Ingredient, LongDrink, NewDrink, RecipeInput, ShortDrink, ValidDrink,
    ValidPatch,
};
