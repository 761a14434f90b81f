use anyhow::Result;
use bistro::{
    dietary::DietaryRequest,
    food::CuisineType,
    kitchen::{Kitchen, DEFAULT_CAPACITY},
};
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "bistro")]
#[command(author, version, about = "Load a bistro menu, adjust it for dietary needs and report on it", long_about = None)]
struct Cli {
    /// Menu file; the first line is a header
    file: PathBuf,

    /// Maximum number of dishes the kitchen holds
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    #[arg(long)]
    vegetarian: bool,
    #[arg(long)]
    vegan: bool,
    #[arg(long)]
    gluten_free: bool,
    #[arg(long)]
    low_sodium: bool,
    #[arg(long)]
    low_sugar: bool,
    #[arg(long)]
    nut_free: bool,

    /// Release every dish that takes less than this many minutes
    #[arg(long, value_name = "MINUTES")]
    below_prep_time: Option<u32>,

    /// Release every dish of this cuisine (e.g. ITALIAN)
    #[arg(long, value_name = "CUISINE", value_parser = parse_cuisine)]
    release_cuisine: Option<CuisineType>,

    /// Print only the report
    #[arg(long)]
    no_menu: bool,
}

impl Cli {
    fn dietary_request(&self) -> DietaryRequest {
        DietaryRequest {
            vegetarian: self.vegetarian,
            vegan: self.vegan,
            gluten_free: self.gluten_free,
            low_sodium: self.low_sodium,
            low_sugar: self.low_sugar,
            nut_free: self.nut_free,
        }
    }
}

fn parse_cuisine(token: &str) -> Result<CuisineType, String> {
    CuisineType::parse_token(&token.to_uppercase())
        .ok_or_else(|| format!("unknown cuisine '{}'", token))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut kitchen = match Kitchen::from_file(&cli.file, cli.capacity) {
        Ok((kitchen, _)) => kitchen,
        Err(e) => {
            error!("{:#}", e);
            Kitchen::with_capacity(cli.capacity)
        }
    };

    if let Some(prep_time) = cli.below_prep_time {
        kitchen.release_dishes_below_prep_time(prep_time);
    }
    if let Some(cuisine) = cli.release_cuisine {
        kitchen.release_dishes_of_cuisine(cuisine);
    }

    let request = cli.dietary_request();
    if !request.is_empty() {
        kitchen.dietary_adjustment(&request);
    }

    if !cli.no_menu {
        print!("{}", kitchen.menu());
    }
    print!("{}", kitchen.report());
    Ok(())
}
