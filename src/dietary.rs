use crate::food::{Appetizer, Dessert, Dish, DishKind, MainCourse};
use tracing::debug;

pub const NON_VEGETARIAN: [&str; 8] = [
    "Meat", "Chicken", "Fish", "Beef", "Pork", "Lamb", "Shrimp", "Bacon",
];
pub const VEGETARIAN_REPLACEMENTS: [&str; 2] = ["Beans", "Mushrooms"];
pub const GLUTEN: [&str; 8] = [
    "Wheat", "Flour", "Bread", "Pasta", "Barley", "Rye", "Oats", "Crust",
];
pub const DAIRY_AND_EGGS: [&str; 6] = ["Milk", "Eggs", "Cheese", "Butter", "Cream", "Yogurt"];
pub const NUTS: [&str; 7] = [
    "Almonds",
    "Walnuts",
    "Pecans",
    "Hazelnuts",
    "Peanuts",
    "Cashews",
    "Pistachios",
];

const LOW_SODIUM_SPICE_DROP: u32 = 2;
const LOW_SUGAR_SWEETNESS_DROP: u32 = 3;
const TOFU: &str = "Tofu";

/// Dietary needs a guest can ask for. Each kind of dish only looks at the
/// flags it knows how to accommodate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct DietaryRequest {
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub low_sodium: bool,
    pub low_sugar: bool,
    pub nut_free: bool,
}

impl DietaryRequest {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Rebuilds `ingredients`, swapping each forbidden entry for the next unused
/// replacement and dropping forbidden entries once the replacements run out.
/// Matching is by exact name.
pub fn substitute(ingredients: &[String], forbidden: &[&str], replacements: &[&str]) -> Vec<String> {
    let mut replacements = replacements.iter();
    ingredients
        .iter()
        .filter_map(|ingredient| {
            if forbidden.contains(&ingredient.as_str()) {
                replacements.next().map(|replacement| replacement.to_string())
            } else {
                Some(ingredient.clone())
            }
        })
        .collect()
}

/// Rebuilds `ingredients` without any forbidden entry.
pub fn exclude(ingredients: &[String], forbidden: &[&str]) -> Vec<String> {
    substitute(ingredients, forbidden, &[])
}

impl Dish {
    /// Adjusts this dish in place. Applying the same request twice is not
    /// guaranteed to be a no-op the second time.
    pub fn apply_dietary_request(&mut self, request: &DietaryRequest) {
        debug!("adjusting {} for {:?}", self.name, request);
        let ingredients = &mut self.ingredients;
        match &mut self.kind {
            DishKind::Appetizer(appetizer) => accommodate_appetizer(appetizer, ingredients, request),
            DishKind::MainCourse(main_course) => {
                accommodate_main_course(main_course, ingredients, request)
            }
            DishKind::Dessert(dessert) => accommodate_dessert(dessert, ingredients, request),
        }
    }
}

fn accommodate_appetizer(
    appetizer: &mut Appetizer,
    ingredients: &mut Vec<String>,
    request: &DietaryRequest,
) {
    if request.vegetarian {
        appetizer.vegetarian = true;
        *ingredients = substitute(ingredients, &NON_VEGETARIAN, &VEGETARIAN_REPLACEMENTS);
    }
    if request.low_sodium {
        appetizer.spiciness_level = appetizer
            .spiciness_level
            .saturating_sub(LOW_SODIUM_SPICE_DROP);
    }
    if request.gluten_free {
        *ingredients = exclude(ingredients, &GLUTEN);
    }
}

fn accommodate_main_course(
    main_course: &mut MainCourse,
    ingredients: &mut Vec<String>,
    request: &DietaryRequest,
) {
    if request.vegetarian {
        main_course.protein_type = TOFU.to_string();
        *ingredients = substitute(ingredients, &NON_VEGETARIAN, &VEGETARIAN_REPLACEMENTS);
    }
    if request.vegan {
        main_course.protein_type = TOFU.to_string();
        *ingredients = exclude(ingredients, &DAIRY_AND_EGGS);
    }
    if request.gluten_free {
        main_course.gluten_free = true;
        main_course
            .side_dishes
            .retain(|side| !side.category.contains_gluten());
    }
}

fn accommodate_dessert(dessert: &mut Dessert, ingredients: &mut Vec<String>, request: &DietaryRequest) {
    if request.nut_free {
        dessert.contains_nuts = false;
        *ingredients = exclude(ingredients, &NUTS);
    }
    if request.low_sugar {
        dessert.sweetness_level = dessert
            .sweetness_level
            .saturating_sub(LOW_SUGAR_SWEETNESS_DROP);
    }
    if request.vegan {
        *ingredients = exclude(ingredients, &DAIRY_AND_EGGS);
    }
}
