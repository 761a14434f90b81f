use crate::{
    dietary::DietaryRequest,
    food::{CuisineType, Dish, CUISINE_TYPES},
    record::decode_record,
};
use anyhow::{Context, Result};
use std::{fmt, fs, path::Path};
use tracing::{debug, info, warn};

pub const DEFAULT_CAPACITY: usize = 100;

/// Outcome of importing a menu file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ImportSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub rejected: usize,
}

/// Owns every dish on the menu, up to a fixed capacity, and keeps running
/// totals that always match the dishes it holds.
#[derive(Debug)]
pub struct Kitchen {
    capacity: usize,
    dishes: Vec<Dish>,
    total_prep_time: u64,
    count_elaborate: usize,
}

impl Default for Kitchen {
    fn default() -> Self {
        Self::new()
    }
}

impl Kitchen {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            dishes: Vec::new(),
            total_prep_time: 0,
            count_elaborate: 0,
        }
    }

    /// Builds a kitchen from a menu file. The first line is a header.
    pub fn from_file(path: impl AsRef<Path>, capacity: usize) -> Result<(Self, ImportSummary)> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read menu file {}", path.display()))?;
        let mut kitchen = Self::with_capacity(capacity);
        let summary = kitchen.import(&contents);
        info!(
            "loaded {} dishes from {} ({} skipped, {} rejected)",
            summary.loaded,
            path.display(),
            summary.skipped,
            summary.rejected
        );
        Ok((kitchen, summary))
    }

    /// Adds every record after the header line. Malformed records are
    /// skipped, records that don't fit are rejected.
    pub fn import(&mut self, contents: &str) -> ImportSummary {
        let mut summary = ImportSummary::default();
        for (index, line) in contents.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            match decode_record(line) {
                Ok(dish) => {
                    let name = dish.name.clone();
                    if self.new_order(dish) {
                        summary.loaded += 1;
                    } else {
                        warn!("kitchen is full, rejected {} on line {}", name, index + 1);
                        summary.rejected += 1;
                    }
                }
                Err(e) => {
                    warn!("skipping line {}: {}", index + 1, e);
                    summary.skipped += 1;
                }
            }
        }
        summary
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn len(&self) -> usize {
        self.dishes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Returns `false` when the kitchen is already at capacity.
    pub fn new_order(&mut self, dish: Dish) -> bool {
        if self.dishes.len() >= self.capacity {
            return false;
        }
        debug!("new order: {}", dish.name);
        self.total_prep_time += u64::from(dish.prep_time);
        if dish.is_elaborate() {
            self.count_elaborate += 1;
        }
        self.dishes.push(dish);
        true
    }

    /// Removes one dish equal to `dish`. Returns `false` if none was found.
    pub fn serve_dish(&mut self, dish: &Dish) -> bool {
        match self.dishes.iter().position(|candidate| candidate == dish) {
            Some(index) => {
                let served = self.dishes.swap_remove(index);
                self.forget(&served);
                debug!("served: {}", served.name);
                true
            }
            None => false,
        }
    }

    fn forget(&mut self, dish: &Dish) {
        self.total_prep_time -= u64::from(dish.prep_time);
        if dish.is_elaborate() {
            self.count_elaborate -= 1;
        }
    }

    /// Rebuilds the running totals from the dishes currently held.
    pub fn recompute_totals(&mut self) {
        self.total_prep_time = self
            .dishes
            .iter()
            .map(|dish| u64::from(dish.prep_time))
            .sum();
        self.count_elaborate = self.dishes.iter().filter(|dish| dish.is_elaborate()).count();
    }

    pub fn prep_time_sum(&self) -> u64 {
        self.total_prep_time
    }

    /// Average prep time rounded to the nearest minute, 0 when empty.
    pub fn average_prep_time(&self) -> u64 {
        if self.dishes.is_empty() {
            return 0;
        }
        (self.total_prep_time as f64 / self.dishes.len() as f64).round() as u64
    }

    pub fn elaborate_dish_count(&self) -> usize {
        self.count_elaborate
    }

    /// Share of elaborate dishes as a percentage with two decimals.
    pub fn elaborate_percentage(&self) -> f64 {
        if self.dishes.is_empty() {
            return 0.0;
        }
        (self.count_elaborate as f64 / self.dishes.len() as f64 * 10000.0).round() / 100.0
    }

    pub fn tally_cuisine(&self, cuisine: CuisineType) -> usize {
        self.dishes
            .iter()
            .filter(|dish| dish.cuisine == cuisine)
            .count()
    }

    /// Removes every dish that takes strictly less than `prep_time` minutes.
    pub fn release_dishes_below_prep_time(&mut self, prep_time: u32) -> usize {
        self.release_where(|dish| dish.prep_time < prep_time)
    }

    pub fn release_dishes_of_cuisine(&mut self, cuisine: CuisineType) -> usize {
        self.release_where(|dish| dish.cuisine == cuisine)
    }

    fn release_where(&mut self, mut predicate: impl FnMut(&Dish) -> bool) -> usize {
        let (released, kept): (Vec<Dish>, Vec<Dish>) =
            self.dishes.drain(..).partition(|dish| predicate(dish));
        self.dishes = kept;
        for dish in &released {
            self.forget(dish);
        }
        info!("released {} dishes", released.len());
        released.len()
    }

    /// Applies `request` to every dish in place.
    pub fn dietary_adjustment(&mut self, request: &DietaryRequest) {
        for dish in &mut self.dishes {
            dish.apply_dietary_request(request);
        }
        // Accommodations can change ingredient counts, so elaborate status may shift.
        self.recompute_totals();
    }

    /// Every dish, separated by blank lines.
    pub fn menu(&self) -> Menu<'_> {
        Menu(self)
    }

    pub fn report(&self) -> Report<'_> {
        Report(self)
    }
}

pub struct Menu<'a>(&'a Kitchen);

impl fmt::Display for Menu<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dish in &self.0.dishes {
            writeln!(f, "{}\n", dish)?;
        }
        Ok(())
    }
}

/// Dishes per cuisine, then average prep time and the elaborate share.
pub struct Report<'a>(&'a Kitchen);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kitchen = self.0;
        for cuisine in CUISINE_TYPES.iter() {
            writeln!(f, "{}: {}", cuisine, kitchen.tally_cuisine(*cuisine))?;
        }
        writeln!(f)?;
        writeln!(f, "AVERAGE PREP TIME: {}", kitchen.average_prep_time())?;
        writeln!(f, "ELABORATE DISHES: {}%", kitchen.elaborate_percentage())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::food::{
        Appetizer, CookingMethod, Dessert, DishKind, FlavorProfile, MainCourse, ServingStyle,
        SideCategory, SideDish,
    };
    use std::io::Write as _;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    fn init_tracing() {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    fn assert_totals_consistent(kitchen: &Kitchen) {
        let sum: u64 = kitchen
            .dishes()
            .iter()
            .map(|dish| u64::from(dish.prep_time))
            .sum();
        let elaborate = kitchen.dishes().iter().filter(|dish| dish.is_elaborate()).count();
        assert_eq!(kitchen.prep_time_sum(), sum);
        assert_eq!(kitchen.elaborate_dish_count(), elaborate);
    }

    fn nachos(prep_time: u32) -> Dish {
        Dish::new(
            "Nachos",
            ["Chips", "Cheese", "Beef"],
            prep_time,
            8.0,
            CuisineType::Mexican,
            Appetizer {
                serving_style: ServingStyle::FamilyStyle,
                spiciness_level: 3,
                vegetarian: false,
            },
        )
    }

    fn beef_wellington() -> Dish {
        Dish::new(
            "Beef Wellington",
            ["Beef", "Mushrooms", "Crust", "Butter", "Eggs"],
            120,
            42.0,
            CuisineType::French,
            MainCourse {
                cooking_method: CookingMethod::Baked,
                protein_type: "Beef".to_string(),
                side_dishes: vec![
                    SideDish::new("Mashed Potatoes", SideCategory::Starches),
                    SideDish::new("Green Beans", SideCategory::Vegetable),
                ],
                gluten_free: false,
            },
        )
    }

    fn gelato() -> Dish {
        Dish::new(
            "Gelato",
            ["Milk", "Sugar", "Pistachios"],
            30,
            4.5,
            CuisineType::Italian,
            Dessert {
                flavor_profile: FlavorProfile::Sweet,
                sweetness_level: 7,
                contains_nuts: true,
            },
        )
    }

    #[test]
    fn empty_kitchen_aggregates() {
        let mut kitchen = Kitchen::new();
        assert_eq!(kitchen.average_prep_time(), 0);
        assert_eq!(kitchen.elaborate_percentage(), 0.0);
        assert_eq!(kitchen.prep_time_sum(), 0);
        assert!(!kitchen.serve_dish(&gelato()));
    }

    #[test]
    fn average_prep_time_is_rounded() {
        let mut kitchen = Kitchen::new();
        for prep_time in [10, 20, 30] {
            assert!(kitchen.new_order(nachos(prep_time)));
        }
        assert_eq!(kitchen.prep_time_sum(), 60);
        assert_eq!(kitchen.average_prep_time(), 20);

        kitchen.new_order(nachos(15));
        // 75 / 4 = 18.75
        assert_eq!(kitchen.average_prep_time(), 19);
    }

    #[test]
    fn elaborate_percentage_has_two_decimals() {
        let mut kitchen = Kitchen::new();
        kitchen.new_order(beef_wellington());
        kitchen.new_order(nachos(10));
        kitchen.new_order(nachos(20));
        kitchen.new_order(gelato());
        assert_eq!(kitchen.elaborate_dish_count(), 1);
        assert_eq!(kitchen.elaborate_percentage(), 25.0);

        kitchen.new_order(nachos(30));
        kitchen.new_order(nachos(40));
        assert_eq!(kitchen.elaborate_percentage(), 16.67);
    }

    #[test]
    fn full_kitchen_refuses_orders() {
        let mut kitchen = Kitchen::with_capacity(2);
        assert!(kitchen.new_order(nachos(10)));
        assert!(kitchen.new_order(gelato()));
        assert!(!kitchen.new_order(beef_wellington()));
        assert_eq!(kitchen.len(), 2);
        assert_eq!(kitchen.elaborate_dish_count(), 0);
        assert_totals_consistent(&kitchen);
    }

    #[test]
    fn capacity_is_only_a_limit() {
        let mut kitchen = Kitchen::with_capacity(usize::MAX);
        assert_eq!(kitchen.capacity(), usize::MAX);
        assert!(kitchen.new_order(gelato()));
        assert_eq!(kitchen.len(), 1);
        assert_totals_consistent(&kitchen);
    }

    #[test]
    fn serving_keeps_totals_consistent() {
        init_tracing();
        let mut kitchen = Kitchen::new();
        kitchen.new_order(beef_wellington());
        kitchen.new_order(nachos(10));
        kitchen.new_order(nachos(10));
        kitchen.new_order(gelato());

        assert!(kitchen.serve_dish(&nachos(10)));
        assert_eq!(kitchen.len(), 3);
        assert_totals_consistent(&kitchen);

        assert!(kitchen.serve_dish(&beef_wellington()));
        assert_eq!(kitchen.elaborate_dish_count(), 0);
        assert_totals_consistent(&kitchen);

        let before = kitchen.prep_time_sum();
        assert!(!kitchen.serve_dish(&nachos(99)));
        assert_eq!(kitchen.prep_time_sum(), before);
        assert_eq!(kitchen.len(), 2);
    }

    #[test]
    fn release_below_prep_time_is_strict() {
        let mut kitchen = Kitchen::new();
        kitchen.new_order(nachos(10));
        kitchen.new_order(nachos(29));
        kitchen.new_order(gelato());
        kitchen.new_order(beef_wellington());

        assert_eq!(kitchen.release_dishes_below_prep_time(30), 2);
        assert_eq!(kitchen.len(), 2);
        assert_eq!(kitchen.prep_time_sum(), 150);
        assert_totals_consistent(&kitchen);
    }

    #[test]
    fn release_of_cuisine() {
        let mut kitchen = Kitchen::new();
        kitchen.new_order(nachos(10));
        kitchen.new_order(nachos(20));
        kitchen.new_order(gelato());

        assert_eq!(kitchen.tally_cuisine(CuisineType::Mexican), 2);
        assert_eq!(kitchen.release_dishes_of_cuisine(CuisineType::Mexican), 2);
        assert_eq!(kitchen.tally_cuisine(CuisineType::Mexican), 0);
        assert_eq!(kitchen.tally_cuisine(CuisineType::Italian), 1);
        assert_eq!(kitchen.release_dishes_of_cuisine(CuisineType::Chinese), 0);
        assert_totals_consistent(&kitchen);
    }

    #[test]
    fn dietary_adjustment_keeps_membership() {
        let mut kitchen = Kitchen::new();
        kitchen.new_order(beef_wellington());
        kitchen.new_order(nachos(10));
        kitchen.new_order(gelato());
        assert_eq!(kitchen.elaborate_dish_count(), 1);

        kitchen.dietary_adjustment(&DietaryRequest {
            vegan: true,
            nut_free: true,
            ..Default::default()
        });

        assert_eq!(kitchen.len(), 3);
        let wellington = &kitchen.dishes()[0];
        assert_eq!(wellington.ingredients, vec!["Beef", "Mushrooms", "Crust"]);
        assert!(matches!(
            &wellington.kind,
            DishKind::MainCourse(main_course) if main_course.protein_type == "Tofu"
        ));
        assert_eq!(kitchen.dishes()[2].ingredients, vec!["Sugar"]);
        assert_eq!(kitchen.elaborate_dish_count(), 0);
        assert_totals_consistent(&kitchen);
    }

    #[test]
    fn import_skips_header_and_bad_records() {
        init_tracing();
        let mut kitchen = Kitchen::new();
        let summary = kitchen.import(
            "type,name,ingredients,prep,price,cuisine,extra\n\
             APPETIZER,Spring Rolls,Fish;Wheat;Rice,20,6.50,CHINESE,PLATED;2,false\n\
             \n\
             DESSERT,Broken,Sugar,abc,1.00,OTHER,SWEET;1;false\n\
             MAINCOURSE,Pad Thai,Shrimp;Noodles;Peanuts;Eggs;Lime,60,13.00,OTHER,FRIED;Shrimp;Rice:GRAIN|Salad:SALAD;false\n",
        );

        assert_eq!(
            summary,
            ImportSummary {
                loaded: 2,
                skipped: 1,
                rejected: 0,
            }
        );
        assert_eq!(kitchen.len(), 2);
        assert_eq!(kitchen.elaborate_dish_count(), 1);
        assert_eq!(kitchen.prep_time_sum(), 80);
    }

    #[test]
    fn import_rejects_records_beyond_capacity() {
        let mut kitchen = Kitchen::with_capacity(1);
        let summary = kitchen.import(
            "header\n\
             DESSERT,Flan,Eggs;Milk,40,4.00,MEXICAN,SWEET;7;false\n\
             DESSERT,Churros,Flour;Sugar,25,3.50,MEXICAN,SWEET;8;false\n",
        );
        assert_eq!(summary.loaded, 1);
        assert_eq!(summary.rejected, 1);
        assert_eq!(kitchen.dishes()[0].name, "Flan");
    }

    #[test]
    fn sample_menu_report() {
        let mut kitchen = Kitchen::new();
        let summary = kitchen.import(include_str!("../data/menu.csv"));
        assert_eq!(summary.skipped, 0);
        assert_eq!(kitchen.len(), 8);

        assert_eq!(
            kitchen.report().to_string(),
            "ITALIAN: 3\n\
             MEXICAN: 2\n\
             CHINESE: 1\n\
             INDIAN: 1\n\
             AMERICAN: 1\n\
             FRENCH: 0\n\
             OTHER: 0\n\
             \n\
             AVERAGE PREP TIME: 45\n\
             ELABORATE DISHES: 25%\n"
        );
    }

    #[test]
    fn menu_separates_dishes_with_blank_lines() {
        let mut kitchen = Kitchen::new();
        kitchen.new_order(nachos(10));
        kitchen.new_order(gelato());

        let menu = kitchen.menu().to_string();
        assert!(menu.starts_with("Dish Name: Nachos\n"));
        assert!(menu.contains("Vegetarian: No\n\nDish Name: Gelato\n"));
        assert!(menu.ends_with("Contains Nuts: Yes\n\n"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Kitchen::from_file(dir.path().join("missing.csv"), DEFAULT_CAPACITY);
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "type,name,ingredients,prep,price,cuisine,extra").unwrap();
        writeln!(
            file,
            "DESSERT,Baklava,Walnuts;Honey;Butter;Flour;Pistachios,90,6.00,OTHER,SWEET;9;true"
        )
        .unwrap();

        let (kitchen, summary) = Kitchen::from_file(file.path(), 10).unwrap();
        assert_eq!(summary.loaded, 1);
        assert_eq!(kitchen.capacity(), 10);
        assert_eq!(kitchen.tally_cuisine(CuisineType::Other), 1);
        assert_eq!(kitchen.elaborate_percentage(), 100.0);
    }
}
