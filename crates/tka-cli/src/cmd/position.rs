use crate::output::print_json;
use tka_core::beat::{grid_position_pair, LocationPair};
use tka_core::types::Location;

pub fn run(first: &str, second: Option<&str>, json: bool) -> anyhow::Result<()> {
    let pair = match second {
        Some(red) => {
            let blue: Location = first.parse()?;
            LocationPair::new(blue, red.parse()?)
        }
        None => grid_position_pair(&first.to_ascii_lowercase())?,
    };
    let name = pair.grid_position();

    if json {
        let value = serde_json::json!({
            "position": pair,
            "blue": pair.blue,
            "red": pair.red,
            "grid_position": name,
        });
        print_json(&value)?;
        return Ok(());
    }

    match (second, name) {
        (None, _) => println!("{pair}"),
        (Some(_), Some(name)) => println!("{name}"),
        (Some(_), None) => anyhow::bail!("{pair} is not a standard grid position"),
    }
    Ok(())
}
