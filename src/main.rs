/// Headless preview entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use omf_pages::preview::{self, Scenario};

    let Some(path) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: omf-preview <scenario.json>");
        std::process::exit(2);
    };

    let scenario = match Scenario::load(&path) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Invalid scenario {}: {}", path.display(), e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(scenario.config.log_level.to_level_filter())
        .parse_default_env()
        .init();

    match preview::run(&scenario) {
        Ok(result) => {
            for request in &result.requests {
                log::info!("{request}");
            }
            print!("{}", result.page.to_html());
        }
        Err(e) => {
            eprintln!("Preview error: {}", e);
            std::process::exit(1);
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
