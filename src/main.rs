use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use dungeon_data::{Config, DataResult, GameData, ResourceType, logging};

fn run() -> DataResult<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("dungeon.toml"));
    let config = Config::load(&config_path)?;

    let guard = logging::init(&config)?;
    println!("Logging to {}", guard.path().display());

    let data = if config.data_dir.exists() {
        GameData::load_from_directory(&config.data_dir)?
    } else {
        info!("Data directory {:?} missing, using built-in data", config.data_dir);
        GameData::builtin()?
    };

    let data = match GameData::install(data) {
        Ok(installed) => installed,
        Err(_) => GameData::global()?,
    };

    let mut recipes: Vec<_> = data.recipes.all().collect();
    recipes.sort_by(|a, b| a.id.cmp(&b.id));
    for recipe in recipes {
        let ingredients = recipe
            .ingredients
            .iter()
            .map(|i| format!("{} x{}", i.resource_id, i.count))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{:<18} {} <- {}", recipe.id, recipe.result, ingredients);
    }

    match data.resources.random(Some(ResourceType::Ore)) {
        Ok(resource) => println!("Random ore: {}", resource),
        Err(e) => println!("{}", e),
    }

    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
