//! Categories command - list the seeded category set

use anyhow::Result;

use super::get_context;
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(ctx.store.categories())?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Id", "Name", "Direction", "Icon", "Color"]);
    for category in ctx.store.categories() {
        table.add_row(vec![
            category.id.clone(),
            category.name.clone(),
            category.kind.to_string(),
            category.icon.clone(),
            category.color.clone(),
        ]);
    }
    println!("{table}");

    Ok(())
}
