use serde::{Deserialize, Serialize};

use triad_core::error::require_text;
use triad_core::{DomainError, DomainResult, DrinkId};

/// One recipe line: how many parts of which ingredient, and the colour it
/// shows in the cup graphic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub color: String,
    pub parts: u32,
}

/// A stored drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drink {
    pub id: DrinkId,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// Public representation: ingredient names are withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortDrink {
    pub id: DrinkId,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: u32,
}

/// Full representation for staff.
pub type LongDrink = Drink;

impl Drink {
    pub fn short(&self) -> ShortDrink {
        ShortDrink {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|i| ShortIngredient {
                    color: i.color.clone(),
                    parts: i.parts,
                })
                .collect(),
        }
    }

    pub fn long(&self) -> LongDrink {
        self.clone()
    }

    /// Apply an already validated patch.
    pub fn apply(&mut self, patch: ValidPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(recipe) = patch.recipe {
            self.recipe = recipe;
        }
    }
}

/// A recipe as clients send it: a list, or a single ingredient object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RecipeInput {
    Many(Vec<Ingredient>),
    One(Ingredient),
}

impl RecipeInput {
    pub fn into_vec(self) -> Vec<Ingredient> {
        match self {
            Self::Many(v) => v,
            Self::One(i) => vec![i],
        }
    }
}

/// Body of `POST /drinks`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewDrink {
    pub title: String,
    pub recipe: RecipeInput,
}

/// A drink that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDrink {
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

impl ValidDrink {
    pub fn into_drink(self, id: DrinkId) -> Drink {
        Drink {
            id,
            title: self.title,
            recipe: self.recipe,
        }
    }
}

impl NewDrink {
    pub fn validate(self) -> DomainResult<ValidDrink> {
        Ok(ValidDrink {
            title: validate_title(&self.title)?,
            recipe: validate_recipe(self.recipe.into_vec())?,
        })
    }
}

/// Body of `PATCH /drinks/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DrinkPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<RecipeInput>,
}

/// A patch that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidPatch {
    pub title: Option<String>,
    pub recipe: Option<Vec<Ingredient>>,
}

impl DrinkPatch {
    pub fn validate(self) -> DomainResult<ValidPatch> {
        if self.title.is_none() && self.recipe.is_none() {
            return Err(DomainError::validation("patch must set title or recipe"));
        }
        Ok(ValidPatch {
            title: self.title.as_deref().map(validate_title).transpose()?,
            recipe: self.recipe.map(|r| validate_recipe(r.into_vec())).transpose()?,
        })
    }
}

fn validate_title(title: &str) -> DomainResult<String> {
    require_text("title", title)?;
    Ok(title.trim().to_string())
}

fn validate_recipe(recipe: Vec<Ingredient>) -> DomainResult<Vec<Ingredient>> {
    if recipe.is_empty() {
        return Err(DomainError::validation("recipe must list at least one ingredient"));
    }
    for ingredient in &recipe {
        require_text("ingredient name", &ingredient.name)?;
        require_text("ingredient color", &ingredient.color)?;
        if ingredient.parts == 0 {
            return Err(DomainError::validation("ingredient parts must be at least 1"));
        }
    }
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn water() -> Ingredient {
        Ingredient {
            name: "Water".to_string(),
            color: "blue".to_string(),
            parts: 1,
        }
    }

    #[test]
    fn short_form_hides_ingredient_names() {
        let drink = Drink {
            id: DrinkId::new(1),
            title: "Water".to_string(),
            recipe: vec![water()],
        };
        let short = serde_json::to_value(drink.short()).unwrap();
        assert_eq!(short, json!({"id": 1, "title": "Water", "recipe": [{"color": "blue", "parts": 1}]}));
        let long = serde_json::to_value(drink.long()).unwrap();
        assert_eq!(long["recipe"][0]["name"], "Water");
    }

    #[test]
    fn single_object_recipe_is_wrapped() {
        let body: NewDrink = serde_json::from_value(json!({
            "title": "Water",
            "recipe": {"name": "Water", "color": "blue", "parts": 1},
        }))
        .unwrap();
        let valid = body.validate().unwrap();
        assert_eq!(valid.recipe, vec![water()]);
    }

    #[test]
    fn empty_recipe_and_zero_parts_are_rejected() {
        let empty = NewDrink {
            title: "Nothing".to_string(),
            recipe: RecipeInput::Many(vec![]),
        };
        assert!(empty.validate().is_err());

        let zero = NewDrink {
            title: "Thin".to_string(),
            recipe: RecipeInput::One(Ingredient { parts: 0, ..water() }),
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn empty_patch_is_rejected_and_partial_patch_applies() {
        assert!(DrinkPatch::default().validate().is_err());

        let mut drink = Drink {
            id: DrinkId::new(3),
            title: "Water".to_string(),
            recipe: vec![water()],
        };
        let patch = DrinkPatch {
            title: Some(" Sparkling Water ".to_string()),
            recipe: None,
        };
        drink.apply(patch.validate().unwrap());
        assert_eq!(drink.title, "Sparkling Water");
        assert_eq!(drink.recipe, vec![water()]);
    }
}
