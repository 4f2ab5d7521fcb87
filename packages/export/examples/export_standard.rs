//! Build a small document, export both modes, print the results.
//!
//! Run with: cargo run --example export_standard -p docsmith-export

use anyhow::Result;
use docsmith_composer::NullCapture;
use docsmith_export::Exporter;
use docsmith_model::{
    Entity, EntityStore, Group, MemberRef, OrderModel, Page, Row, Section, Table, PAGE_SCOPE,
};

fn main() -> Result<()> {
    let mut page = Page::new();
    let mut store = EntityStore::new();
    let mut orders = OrderModel::new();

    page.sections.push(Section::new("company-info", "Company"));
    store.add(
        "company-info",
        Entity::predefined("company-name", "Company Name").with_value("Acme Corp"),
    );
    store.add(
        "company-info",
        Entity::predefined("company-phone", "Phone").with_placeholder("(555) 123-4567"),
    );
    orders.set_order(
        "company-info",
        vec!["company-name".to_string(), "company-phone".to_string()],
    );

    page.tables.push(Table::new("line-items", "Items"));
    for (id, label) in [
        ("itemNumber", "Item #"),
        ("description", "Description"),
        ("qty", "Qty"),
        ("rate", "Rate"),
    ] {
        store.add("line-items", Entity::predefined(id, label));
    }
    page.find_table_mut("line-items").unwrap().rows.push(
        Row::new()
            .with("itemNumber", "1")
            .with("description", "Widget")
            .with("qty", "5")
            .with("rate", "10.00"),
    );

    page.groups.push(
        Group::new("header", "Header")
            .with_member(MemberRef::Section("company-info".to_string())),
    );
    page.groups.push(
        Group::new("body", "Body").with_member(MemberRef::Table("line-items".to_string())),
    );
    orders.set_order(
        PAGE_SCOPE,
        vec!["header".to_string(), "body".to_string()],
    );

    let mut exporter = Exporter::new();
    let output = exporter.export(&page, &store, &orders, &NullCapture)?;

    println!("--- literal ---\n{}", output.literal);
    println!("--- template ---\n{}", output.template);

    Ok(())
}
