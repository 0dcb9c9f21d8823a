use super::{open_engine, print_log, print_model, GlobalArgs};
use crate::Result;

pub fn run(global: &GlobalArgs, json: bool) -> Result<()> {
    let engine = open_engine(global)?;
    let model = engine.render();

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print_model(&model);
        println!();
        print_log(&model);
    }

    Ok(())
}
