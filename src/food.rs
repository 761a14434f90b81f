use std::{fmt, fmt::Display};

/// A dish needs at least this many ingredients to count as elaborate.
pub const ELABORATE_MIN_INGREDIENTS: usize = 5;
/// A dish needs at least this many minutes of preparation to count as elaborate.
pub const ELABORATE_MIN_PREP_TIME: u32 = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CuisineType {
    Italian,
    Mexican,
    Chinese,
    Indian,
    American,
    French,
    #[default]
    Other,
}

pub static CUISINE_TYPES: [CuisineType; 7] = [
    CuisineType::Italian,
    CuisineType::Mexican,
    CuisineType::Chinese,
    CuisineType::Indian,
    CuisineType::American,
    CuisineType::French,
    CuisineType::Other,
];

impl CuisineType {
    /// Unknown tokens fall back to `Other`.
    pub fn from_token(token: &str) -> Self {
        Self::parse_token(token).unwrap_or(CuisineType::Other)
    }

    /// Exact token match with no fallback.
    pub fn parse_token(token: &str) -> Option<Self> {
        CUISINE_TYPES
            .iter()
            .copied()
            .find(|cuisine| cuisine.token() == token)
    }

    pub fn token(&self) -> &'static str {
        match self {
            CuisineType::Italian => "ITALIAN",
            CuisineType::Mexican => "MEXICAN",
            CuisineType::Chinese => "CHINESE",
            CuisineType::Indian => "INDIAN",
            CuisineType::American => "AMERICAN",
            CuisineType::French => "FRENCH",
            CuisineType::Other => "OTHER",
        }
    }
}

impl Display for CuisineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ServingStyle {
    #[default]
    Plated,
    FamilyStyle,
    Buffet,
}

impl ServingStyle {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "PLATED" => Some(ServingStyle::Plated),
            "FAMILY_STYLE" => Some(ServingStyle::FamilyStyle),
            "BUFFET" => Some(ServingStyle::Buffet),
            _ => None,
        }
    }
}

impl Display for ServingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ServingStyle::Plated => "Plated",
                ServingStyle::FamilyStyle => "Family Style",
                ServingStyle::Buffet => "Buffet",
            }
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CookingMethod {
    #[default]
    Grilled,
    Baked,
    Boiled,
    Fried,
    Steamed,
    Raw,
}

impl CookingMethod {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GRILLED" => Some(CookingMethod::Grilled),
            "BAKED" => Some(CookingMethod::Baked),
            "BOILED" => Some(CookingMethod::Boiled),
            "FRIED" => Some(CookingMethod::Fried),
            "STEAMED" => Some(CookingMethod::Steamed),
            "RAW" => Some(CookingMethod::Raw),
            _ => None,
        }
    }
}

impl Display for CookingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CookingMethod::Grilled => "Grilled",
                CookingMethod::Baked => "Baked",
                CookingMethod::Boiled => "Boiled",
                CookingMethod::Fried => "Fried",
                CookingMethod::Steamed => "Steamed",
                CookingMethod::Raw => "Raw",
            }
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SideCategory {
    #[default]
    Grain,
    Pasta,
    Legume,
    Bread,
    Salad,
    Soup,
    Starches,
    Vegetable,
}

impl SideCategory {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "GRAIN" => Some(SideCategory::Grain),
            "PASTA" => Some(SideCategory::Pasta),
            "LEGUME" => Some(SideCategory::Legume),
            "BREAD" => Some(SideCategory::Bread),
            "SALAD" => Some(SideCategory::Salad),
            "SOUP" => Some(SideCategory::Soup),
            "STARCHES" => Some(SideCategory::Starches),
            "VEGETABLE" => Some(SideCategory::Vegetable),
            _ => None,
        }
    }

    pub fn contains_gluten(&self) -> bool {
        matches!(
            self,
            SideCategory::Grain | SideCategory::Pasta | SideCategory::Bread | SideCategory::Starches
        )
    }
}

impl Display for SideCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SideCategory::Grain => "Grain",
                SideCategory::Pasta => "Pasta",
                SideCategory::Legume => "Legume",
                SideCategory::Bread => "Bread",
                SideCategory::Salad => "Salad",
                SideCategory::Soup => "Soup",
                SideCategory::Starches => "Starches",
                SideCategory::Vegetable => "Vegetable",
            }
        )
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FlavorProfile {
    #[default]
    Sweet,
    Bitter,
    Sour,
    Salty,
    Umami,
}

impl FlavorProfile {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "SWEET" => Some(FlavorProfile::Sweet),
            "BITTER" => Some(FlavorProfile::Bitter),
            "SOUR" => Some(FlavorProfile::Sour),
            "SALTY" => Some(FlavorProfile::Salty),
            "UMAMI" => Some(FlavorProfile::Umami),
            _ => None,
        }
    }
}

impl Display for FlavorProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                FlavorProfile::Sweet => "Sweet",
                FlavorProfile::Bitter => "Bitter",
                FlavorProfile::Sour => "Sour",
                FlavorProfile::Salty => "Salty",
                FlavorProfile::Umami => "Umami",
            }
        )
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Appetizer {
    pub serving_style: ServingStyle,
    pub spiciness_level: u32,
    pub vegetarian: bool,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SideDish {
    pub name: String,
    pub category: SideCategory,
}

impl SideDish {
    pub fn new(name: impl Into<String>, category: SideCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct MainCourse {
    pub cooking_method: CookingMethod,
    pub protein_type: String,
    pub side_dishes: Vec<SideDish>,
    pub gluten_free: bool,
}

impl Default for MainCourse {
    fn default() -> Self {
        Self {
            cooking_method: CookingMethod::default(),
            protein_type: "UNKNOWN".to_string(),
            side_dishes: vec![],
            gluten_free: false,
        }
    }
}

impl MainCourse {
    pub fn add_side_dish(&mut self, side_dish: SideDish) {
        self.side_dishes.push(side_dish);
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Dessert {
    pub flavor_profile: FlavorProfile,
    pub sweetness_level: u32,
    pub contains_nuts: bool,
}

/// Fields owned by one particular kind of dish.
#[derive(Clone, PartialEq, Debug)]
pub enum DishKind {
    Appetizer(Appetizer),
    MainCourse(MainCourse),
    Dessert(Dessert),
}

impl From<Appetizer> for DishKind {
    fn from(appetizer: Appetizer) -> Self {
        DishKind::Appetizer(appetizer)
    }
}

impl From<MainCourse> for DishKind {
    fn from(main_course: MainCourse) -> Self {
        DishKind::MainCourse(main_course)
    }
}

impl From<Dessert> for DishKind {
    fn from(dessert: Dessert) -> Self {
        DishKind::Dessert(dessert)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Dish {
    pub name: String,
    pub ingredients: Vec<String>,
    pub prep_time: u32,
    pub price: f64,
    pub cuisine: CuisineType,
    pub kind: DishKind,
}

impl Dish {
    pub fn new<I, S>(
        name: impl Into<String>,
        ingredients: I,
        prep_time: u32,
        price: f64,
        cuisine: CuisineType,
        kind: impl Into<DishKind>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            prep_time,
            price,
            cuisine,
            kind: kind.into(),
        }
    }

    /// Five or more ingredients and at least an hour of preparation.
    pub fn is_elaborate(&self) -> bool {
        self.ingredients.len() >= ELABORATE_MIN_INGREDIENTS
            && self.prep_time >= ELABORATE_MIN_PREP_TIME
    }
}

impl Display for Dish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        writeln!(f, "Dish Name: {}", self.name)?;
        writeln!(f, "Ingredients: {}", self.ingredients.join(", "))?;
        writeln!(f, "Preparation Time: {} minutes", self.prep_time)?;
        writeln!(f, "Price: ${:.2}", self.price)?;
        writeln!(f, "Cuisine Type: {}", self.cuisine)?;
        match &self.kind {
            DishKind::Appetizer(appetizer) => {
                writeln!(f, "Serving Style: {}", appetizer.serving_style)?;
                writeln!(f, "Spiciness Level: {}", appetizer.spiciness_level)?;
                write!(f, "Vegetarian: {}", yes_no(appetizer.vegetarian))
            }
            DishKind::MainCourse(main_course) => {
                writeln!(f, "Cooking Method: {}", main_course.cooking_method)?;
                writeln!(f, "Protein Type: {}", main_course.protein_type)?;
                writeln!(f, "Side Dishes:")?;
                for side in &main_course.side_dishes {
                    writeln!(f, "{} (Category: {})", side.name, side.category)?;
                }
                write!(f, "Gluten-Free: {}", yes_no(main_course.gluten_free))
            }
            DishKind::Dessert(dessert) => {
                writeln!(f, "Flavor Profile: {}", dessert.flavor_profile)?;
                writeln!(f, "Sweetness Level: {}", dessert.sweetness_level)?;
                write!(f, "Contains Nuts: {}", yes_no(dessert.contains_nuts))
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}
