/// Tests for the composition walk: scope order, fallbacks, recovery
use crate::composer::{ComposeError, Composer};
use crate::node::DocNode;
use docsmith_model::{
    Entity, EntityStore, Group, MemberRef, OrderModel, Page, Row, Section, Table, PAGE_SCOPE,
};
use std::collections::HashMap;

fn ids_of(order: &[&str]) -> Vec<String> {
    order.iter().map(|id| id.to_string()).collect()
}

fn no_live() -> HashMap<String, String> {
    HashMap::new()
}

/// Page with one section of two fields and one table, orders seeded
fn sample() -> (Page, EntityStore, OrderModel) {
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
    orders.set_order("company-info", ids_of(&["company-phone", "company-name"]));

    page.tables.push(Table::new("line-items", "Items"));
    store.add("line-items", Entity::predefined("itemNumber", "Item #"));
    store.add("line-items", Entity::predefined("description", "Description"));
    store.add("line-items", Entity::predefined("qty", "Qty"));
    store.add("line-items", Entity::predefined("rate", "Rate"));
    orders.set_order(
        "line-items",
        ids_of(&["itemNumber", "description", "qty", "rate"]),
    );

    page.groups.push(
        Group::new("header", "Header")
            .with_member(MemberRef::Section("company-info".to_string())),
    );
    page.groups.push(
        Group::new("body", "Body").with_member(MemberRef::Table("line-items".to_string())),
    );
    orders.set_order(PAGE_SCOPE, ids_of(&["header", "body"]));
    orders.set_order("header", ids_of(&["company-info"]));
    orders.set_order("body", ids_of(&["line-items"]));

    (page, store, orders)
}

fn find_section<'a>(root: &'a DocNode, id: &str) -> &'a DocNode {
    root.children()
        .iter()
        .flat_map(|group| group.children())
        .find(|node| node.tag() == Some("section") && node.attr("id") == Some(id))
        .expect("section not composed")
}

fn find_table<'a>(root: &'a DocNode, id: &str) -> &'a DocNode {
    root.children()
        .iter()
        .flat_map(|group| group.children())
        .find(|node| node.tag() == Some("table") && node.attr("id") == Some(id))
        .expect("table not composed")
}

fn field_ids(section: &DocNode) -> Vec<&str> {
    section
        .children_with_tag("field")
        .map(|field| field.attr("id").unwrap())
        .collect()
}

fn column_ids(table: &DocNode) -> Vec<&str> {
    table
        .children_with_tag("columns")
        .next()
        .expect("columns slot missing")
        .children_with_tag("column")
        .map(|column| column.attr("id").unwrap())
        .collect()
}

fn leaf_content(field: &DocNode) -> &str {
    match &field.children()[0] {
        DocNode::Value { content, .. } => content,
        other => panic!("Expected Value leaf, got {:?}", other),
    }
}

#[test]
fn test_fields_follow_scope_order_with_resolved_values() {
    let (page, store, orders) = sample();
    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    let section = find_section(&root, "company-info");
    assert_eq!(field_ids(section), vec!["company-phone", "company-name"]);

    // phone shows its placeholder, name its stored value
    let fields: Vec<&DocNode> = section.children_with_tag("field").collect();
    assert_eq!(leaf_content(fields[0]), "(555) 123-4567");
    assert_eq!(leaf_content(fields[1]), "Acme Corp");
}

#[test]
fn test_missing_order_falls_back_to_natural_order() {
    let (page, store, mut orders) = sample();
    orders.set_order("company-info", Vec::new());

    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    // insertion order: name was added before phone
    let section = find_section(&root, "company-info");
    assert_eq!(field_ids(section), vec!["company-name", "company-phone"]);
}

#[test]
fn test_dangling_field_reference_is_filtered() {
    let (page, store, mut orders) = sample();
    orders.set_order(
        "company-info",
        ids_of(&["company-phone", "removed-field", "company-name"]),
    );

    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    let section = find_section(&root, "company-info");
    assert_eq!(field_ids(section), vec!["company-phone", "company-name"]);
}

#[test]
fn test_dangling_member_reference_is_filtered() {
    let (mut page, store, orders) = sample();
    // section record removed while the group still names it
    page.sections.clear();

    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    let header = &root.children()[0];
    assert_eq!(header.attr("id"), Some("header"));
    assert!(header.children().is_empty());
}

#[test]
fn test_empty_scope_composes_empty_well_formed_element() {
    let mut page = Page::new();
    page.sections.push(Section::new("notes", "Notes"));
    page.groups.push(
        Group::new("footer", "Footer").with_member(MemberRef::Section("notes".to_string())),
    );

    let root = Composer::new()
        .compose(&page, &EntityStore::new(), &OrderModel::new(), &no_live())
        .unwrap();

    let section = find_section(&root, "notes");
    assert!(section.children().is_empty());
}

#[test]
fn test_custom_field_interleaves_and_is_marked() {
    let (page, mut store, mut orders) = sample();
    store.add(
        "company-info",
        Entity::custom("custom-1", "VAT Number").with_value("GB-123"),
    );
    orders.set_order(
        "company-info",
        ids_of(&["company-phone", "custom-1", "company-name"]),
    );

    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    let section = find_section(&root, "company-info");
    assert_eq!(
        field_ids(section),
        vec!["company-phone", "custom-1", "company-name"]
    );
    let custom = section.children_with_tag("field").nth(1).unwrap();
    assert_eq!(custom.attr("custom"), Some("true"));
    assert_eq!(leaf_content(custom), "GB-123");
}

#[test]
fn test_custom_column_appended_then_moved() {
    let (page, mut store, mut orders) = sample();
    orders.set_order("line-items", ids_of(&["itemNumber", "description"]));

    store.add("line-items", Entity::custom("custom-1", "Discount"));
    orders.insert_append("line-items", "custom-1");
    orders.apply_move("line-items", "custom-1", 1);

    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    let table = find_table(&root, "line-items");
    assert_eq!(
        column_ids(table),
        vec!["itemNumber", "custom-1", "description"]
    );
}

#[test]
fn test_row_cells_follow_column_order_with_alias_lookup() {
    let (mut page, store, orders) = sample();
    let table = page.find_table_mut("line-items").unwrap();
    // one spelling per cell: internal qty, export unitPrice
    table.rows.push(
        Row::new()
            .with("itemNumber", "1")
            .with("description", "Widget")
            .with("qty", "5")
            .with("unitPrice", "10.00"),
    );

    let root = Composer::new()
        .compose(&page, &store, &orders, &no_live())
        .unwrap();

    let table = find_table(&root, "line-items");
    let rows = table.children_with_tag("rows").next().unwrap();
    let row = &rows.children()[0];

    let cells: Vec<(&str, &str, &str)> = row
        .children_with_tag("cell")
        .map(|cell| {
            let (key, content) = match &cell.children()[0] {
                DocNode::Value { key, content } => (key.as_str(), content.as_str()),
                other => panic!("Expected Value leaf, got {:?}", other),
            };
            (cell.attr("column").unwrap(), key, content)
        })
        .collect();

    assert_eq!(
        cells,
        vec![
            ("itemNumber", "itemNumber", "1"),
            ("description", "description", "Widget"),
            // structural attr keeps the internal spelling, the leaf key the
            // export spelling, and values arrive through either spelling
            ("qty", "quantity", "5"),
            ("rate", "unitPrice", "10.00"),
        ]
    );
}

#[test]
fn test_live_capture_beats_stored_value() {
    let (page, store, orders) = sample();
    let mut live = HashMap::new();
    live.insert("company-name".to_string(), "Acme Industries".to_string());

    let root = Composer::new().compose(&page, &store, &orders, &live).unwrap();

    let section = find_section(&root, "company-info");
    let name = section.children_with_tag("field").nth(1).unwrap();
    assert_eq!(leaf_content(name), "Acme Industries");
}

#[test]
fn test_calculated_field_ignores_live_capture() {
    let (mut page, mut store, mut orders) = sample();
    page.sections.push(Section::new("totals", "Totals"));
    store.add(
        "totals",
        Entity::predefined("total", "Total").with_value("150.00").calculated(),
    );
    orders.set_order("totals", ids_of(&["total"]));
    let header = page.groups.iter_mut().find(|g| g.id == "header").unwrap();
    header.members.push(MemberRef::Section("totals".to_string()));
    orders.set_order("header", ids_of(&["company-info", "totals"]));

    let mut live = HashMap::new();
    live.insert("total".to_string(), "999.99".to_string());

    let root = Composer::new().compose(&page, &store, &orders, &live).unwrap();
    let totals = find_section(&root, "totals");
    let total = totals.children_with_tag("field").next().unwrap();
    assert_eq!(leaf_content(total), "150.00");
}

#[test]
fn test_duplicate_order_entry_is_an_error() {
    let (page, store, mut orders) = sample();
    orders.set_order(
        "company-info",
        ids_of(&["company-phone", "company-phone", "company-name"]),
    );

    let result = Composer::new().compose(&page, &store, &orders, &no_live());
    assert_eq!(
        result,
        Err(ComposeError::DuplicateOrderEntry {
            scope: "company-info".to_string(),
            id: "company-phone".to_string(),
        })
    );
}

#[test]
fn test_composition_is_deterministic() {
    let (page, store, orders) = sample();
    let composer = Composer::new();

    let first = composer.compose(&page, &store, &orders, &no_live()).unwrap();
    let second = composer.compose(&page, &store, &orders, &no_live()).unwrap();
    assert_eq!(first, second);
}
