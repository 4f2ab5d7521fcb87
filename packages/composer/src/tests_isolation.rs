/// Swap isolation: a reorder at one scope must never perturb another
use crate::composer::Composer;
use crate::node::DocNode;
use docsmith_model::{
    Entity, EntityStore, Group, MemberRef, OrderModel, Page, Section, Table, PAGE_SCOPE,
};
use std::collections::HashMap;

fn ids_of(order: &[&str]) -> Vec<String> {
    order.iter().map(|id| id.to_string()).collect()
}

/// Two groups, two sections, two tables — enough unrelated scopes to
/// observe cross-scope bleed if any existed
fn fixture() -> (Page, EntityStore, OrderModel) {
    let mut page = Page::new();
    let mut store = EntityStore::new();
    let mut orders = OrderModel::new();

    for (section_id, fields) in [
        ("company-info", vec!["company-name", "company-phone"]),
        ("client-info", vec!["client-name", "client-address"]),
    ] {
        page.sections.push(Section::new(section_id, section_id));
        for field_id in &fields {
            store.add(section_id, Entity::predefined(*field_id, *field_id));
        }
        orders.set_order(section_id, ids_of(&fields));
    }

    for (table_id, columns) in [
        ("line-items", vec!["itemNumber", "description", "qty"]),
        ("payments", vec!["date", "method", "paid"]),
    ] {
        page.tables.push(Table::new(table_id, table_id));
        for column_id in &columns {
            store.add(table_id, Entity::predefined(*column_id, *column_id));
        }
        orders.set_order(table_id, ids_of(&columns));
    }

    page.groups.push(
        Group::new("header", "Header")
            .with_member(MemberRef::Section("company-info".to_string()))
            .with_member(MemberRef::Section("client-info".to_string())),
    );
    page.groups.push(
        Group::new("body", "Body")
            .with_member(MemberRef::Table("line-items".to_string()))
            .with_member(MemberRef::Table("payments".to_string())),
    );
    orders.set_order(PAGE_SCOPE, ids_of(&["header", "body"]));
    orders.set_order("header", ids_of(&["company-info", "client-info"]));
    orders.set_order("body", ids_of(&["line-items", "payments"]));

    (page, store, orders)
}

fn compose(page: &Page, store: &EntityStore, orders: &OrderModel) -> DocNode {
    Composer::new()
        .compose(page, store, orders, &HashMap::new())
        .unwrap()
}

fn section_field_ids(root: &DocNode, section_id: &str) -> Vec<String> {
    root.children()
        .iter()
        .flat_map(|group| group.children())
        .filter(|node| node.attr("id") == Some(section_id))
        .flat_map(|section| section.children_with_tag("field"))
        .map(|field| field.attr("id").unwrap().to_string())
        .collect()
}

fn table_column_ids(root: &DocNode, table_id: &str) -> Vec<String> {
    root.children()
        .iter()
        .flat_map(|group| group.children())
        .filter(|node| node.attr("id") == Some(table_id))
        .flat_map(|table| table.children_with_tag("columns"))
        .flat_map(|columns| columns.children())
        .map(|column| column.attr("id").unwrap().to_string())
        .collect()
}

fn group_member_ids(root: &DocNode, group_id: &str) -> Vec<String> {
    root.children()
        .iter()
        .filter(|group| group.attr("id") == Some(group_id))
        .flat_map(|group| group.children())
        .map(|member| member.attr("id").unwrap().to_string())
        .collect()
}

#[test]
fn test_field_move_does_not_touch_other_section() {
    let (page, store, mut orders) = fixture();
    let before = compose(&page, &store, &orders);
    let untouched_before = section_field_ids(&before, "client-info");

    orders.apply_move("company-info", "company-phone", 0);
    let after = compose(&page, &store, &orders);

    assert_eq!(
        section_field_ids(&after, "company-info"),
        ids_of(&["company-phone", "company-name"])
    );
    assert_eq!(section_field_ids(&after, "client-info"), untouched_before);
}

#[test]
fn test_group_swap_does_not_touch_inner_member_order() {
    let (page, store, mut orders) = fixture();

    orders.apply_move(PAGE_SCOPE, "body", 0);
    let root = compose(&page, &store, &orders);

    let group_ids: Vec<&str> = root
        .children()
        .iter()
        .map(|group| group.attr("id").unwrap())
        .collect();
    assert_eq!(group_ids, vec!["body", "header"]);

    // inside the untouched groups, the first member is still the first
    assert_eq!(
        group_member_ids(&root, "header"),
        ids_of(&["company-info", "client-info"])
    );
    assert_eq!(
        group_member_ids(&root, "body"),
        ids_of(&["line-items", "payments"])
    );
}

#[test]
fn test_column_swap_does_not_touch_other_table() {
    let (page, store, mut orders) = fixture();
    let before = compose(&page, &store, &orders);
    let untouched_before = table_column_ids(&before, "payments");

    orders.apply_move("line-items", "qty", 0);
    let after = compose(&page, &store, &orders);

    assert_eq!(
        table_column_ids(&after, "line-items"),
        ids_of(&["qty", "itemNumber", "description"])
    );
    assert_eq!(table_column_ids(&after, "payments"), untouched_before);
}

#[test]
fn test_group_swap_twice_restores_original_composition() {
    let (page, store, mut orders) = fixture();
    let original = compose(&page, &store, &orders);

    orders.apply_move(PAGE_SCOPE, "body", 0);
    orders.apply_move(PAGE_SCOPE, "body", 1);

    assert_eq!(compose(&page, &store, &orders), original);
}
