//! Decoding of one line of the menu import format.
//!
//! A record is a comma separated list of fields:
//!
//! ```text
//! KIND,name,ingredient;ingredient;...,prep_time,price,CUISINE,<kind fields>
//! ```
//!
//! The kind specific tail is split on both `;` and `,`:
//!
//! - `APPETIZER`: `SERVING_STYLE;spiciness;vegetarian`
//! - `MAINCOURSE`: `METHOD;protein;side:CATEGORY|side:CATEGORY;gluten_free`
//! - `DESSERT`: `FLAVOR;sweetness;contains_nuts`
//!
//! Booleans are true only for the literal token `true`.

use crate::food::{
    Appetizer, CookingMethod, CuisineType, Dessert, Dish, DishKind, FlavorProfile, MainCourse,
    ServingStyle, SideCategory, SideDish,
};
use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;
use tracing::warn;

const FIELD_DELIMITER: char = ',';
const LIST_DELIMITER: char = ';';
const KIND_DELIMITERS: [char; 2] = [LIST_DELIMITER, FIELD_DELIMITER];
const SIDE_DISH_DELIMITER: char = '|';
const SIDE_CATEGORY_DELIMITER: char = ':';
const SIDE_DISH_COUNT: usize = 2;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("unknown dish kind '{0}'")]
    UnknownKind(String),

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("dish name is empty")]
    EmptyName,

    #[error("invalid {field} '{value}': {source}")]
    InvalidInteger {
        field: &'static str,
        value: String,
        source: ParseIntError,
    },

    #[error("invalid {field} '{value}': {source}")]
    InvalidDecimal {
        field: &'static str,
        value: String,
        source: ParseFloatError,
    },

    #[error("price must be a non-negative amount, got {0}")]
    InvalidPrice(f64),

    #[error("side dish '{0}' is not of the form name:CATEGORY")]
    MalformedSideDish(String),

    #[error("expected 2 side dishes, found {0}")]
    SideDishCount(usize),

    #[error("unexpected trailing data '{0}'")]
    TrailingData(String),
}

/// Walks a record left to right, handing out one field per call.
struct Fields<'a> {
    rest: Option<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: Some(line) }
    }

    fn next(&mut self, field: &'static str) -> Result<&'a str, DecodeError> {
        self.next_until(field, &[FIELD_DELIMITER])
    }

    fn next_until(&mut self, field: &'static str, delimiters: &[char]) -> Result<&'a str, DecodeError> {
        let rest = self.rest.ok_or(DecodeError::MissingField(field))?;
        match rest.split_once(|c: char| delimiters.contains(&c)) {
            Some((head, tail)) => {
                self.rest = Some(tail);
                Ok(head)
            }
            None => {
                self.rest = None;
                Ok(rest)
            }
        }
    }

    fn next_integer(&mut self, field: &'static str, delimiters: &[char]) -> Result<u32, DecodeError> {
        let value = self.next_until(field, delimiters)?.trim();
        value.parse().map_err(|source| DecodeError::InvalidInteger {
            field,
            value: value.to_string(),
            source,
        })
    }

    fn next_flag(&mut self, field: &'static str, delimiters: &[char]) -> Result<bool, DecodeError> {
        Ok(self.next_until(field, delimiters)?.trim() == "true")
    }

    fn finish(self) -> Result<(), DecodeError> {
        match self.rest {
            Some(rest) if !rest.trim().is_empty() => Err(DecodeError::TrailingData(rest.to_string())),
            _ => Ok(()),
        }
    }
}

/// Decodes one record into a dish.
pub fn decode_record(line: &str) -> Result<Dish, DecodeError> {
    let mut fields = Fields::new(line.trim_end_matches(['\r', '\n']));

    let kind = fields.next("kind")?.trim();
    if !matches!(kind, "APPETIZER" | "MAINCOURSE" | "DESSERT") {
        return Err(DecodeError::UnknownKind(kind.to_string()));
    }

    let name = fields.next("name")?;
    if name.trim().is_empty() {
        return Err(DecodeError::EmptyName);
    }

    let ingredients = fields
        .next("ingredients")?
        .split(LIST_DELIMITER)
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    let prep_time = fields.next_integer("prep time", &[FIELD_DELIMITER])?;
    let price = decode_price(fields.next("price")?)?;
    let cuisine = CuisineType::from_token(fields.next("cuisine")?.trim());

    let kind = match kind {
        "APPETIZER" => decode_appetizer(&mut fields)?,
        "MAINCOURSE" => decode_main_course(&mut fields)?,
        _ => decode_dessert(&mut fields)?,
    };
    fields.finish()?;

    Ok(Dish::new(name, ingredients, prep_time, price, cuisine, kind))
}

fn decode_price(value: &str) -> Result<f64, DecodeError> {
    let value = value.trim();
    let price: f64 = value.parse().map_err(|source| DecodeError::InvalidDecimal {
        field: "price",
        value: value.to_string(),
        source,
    })?;
    if !price.is_finite() || price < 0.0 {
        return Err(DecodeError::InvalidPrice(price));
    }
    Ok(price)
}

fn decode_appetizer(fields: &mut Fields<'_>) -> Result<DishKind, DecodeError> {
    let token = fields.next_until("serving style", &KIND_DELIMITERS)?.trim();
    let serving_style = ServingStyle::from_token(token).unwrap_or_else(|| {
        warn!("unknown serving style '{}', using {}", token, ServingStyle::default());
        ServingStyle::default()
    });
    Ok(Appetizer {
        serving_style,
        spiciness_level: fields.next_integer("spiciness level", &KIND_DELIMITERS)?,
        vegetarian: fields.next_flag("vegetarian", &KIND_DELIMITERS)?,
    }
    .into())
}

fn decode_main_course(fields: &mut Fields<'_>) -> Result<DishKind, DecodeError> {
    let token = fields.next_until("cooking method", &KIND_DELIMITERS)?.trim();
    let cooking_method = CookingMethod::from_token(token).unwrap_or_else(|| {
        warn!("unknown cooking method '{}', using {}", token, CookingMethod::default());
        CookingMethod::default()
    });
    let protein_type = fields.next_until("protein type", &KIND_DELIMITERS)?.to_string();

    let sides = fields
        .next_until("side dishes", &KIND_DELIMITERS)?
        .split(SIDE_DISH_DELIMITER)
        .collect::<Vec<_>>();
    if sides.len() != SIDE_DISH_COUNT {
        return Err(DecodeError::SideDishCount(sides.len()));
    }

    let mut main_course = MainCourse {
        cooking_method,
        protein_type,
        side_dishes: Vec::with_capacity(SIDE_DISH_COUNT),
        gluten_free: false,
    };
    for side in sides {
        main_course.add_side_dish(decode_side_dish(side)?);
    }
    main_course.gluten_free = fields.next_flag("gluten free", &KIND_DELIMITERS)?;

    Ok(main_course.into())
}

fn decode_side_dish(side: &str) -> Result<SideDish, DecodeError> {
    let (name, token) = side
        .split_once(SIDE_CATEGORY_DELIMITER)
        .filter(|(name, _)| !name.trim().is_empty())
        .ok_or_else(|| DecodeError::MalformedSideDish(side.to_string()))?;
    let token = token.trim();
    let category = SideCategory::from_token(token).unwrap_or_else(|| {
        warn!("unknown side dish category '{}', using {}", token, SideCategory::default());
        SideCategory::default()
    });
    Ok(SideDish::new(name, category))
}

fn decode_dessert(fields: &mut Fields<'_>) -> Result<DishKind, DecodeError> {
    let token = fields.next_until("flavor profile", &KIND_DELIMITERS)?.trim();
    let flavor_profile = FlavorProfile::from_token(token).unwrap_or_else(|| {
        warn!("unknown flavor profile '{}', using {}", token, FlavorProfile::default());
        FlavorProfile::default()
    });
    Ok(Dessert {
        flavor_profile,
        sweetness_level: fields.next_integer("sweetness level", &KIND_DELIMITERS)?,
        contains_nuts: fields.next_flag("contains nuts", &KIND_DELIMITERS)?,
    }
    .into())
}
