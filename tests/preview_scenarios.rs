//! Full page lifecycles replayed through the headless preview.

use omf_pages::constants::{classes, ids};
use omf_pages::dom::Renderer;
use omf_pages::preview::{Scenario, run};

#[test]
fn welcome_scenario_file() {
    let scenario = Scenario::from_json(include_str!("../scenarios/welcome.json")).unwrap();
    let preview = run(&scenario).unwrap();
    let page = &preview.page;

    assert_eq!(
        preview.requests,
        vec![
            "GET image_handler?identifier=42",
            "GET image_handler?identifier=7",
            "GET image_handler?identifier=9",
        ]
    );

    // Sales was checked on open: purchases filters disabled from the start
    for field in ids::PURCHASE_FIELDS {
        assert!(page.is_disabled(&page.require_by_id(field).unwrap()));
    }
    for field in ids::SALE_FIELDS {
        assert!(!page.is_disabled(&page.require_by_id(field).unwrap()));
    }

    let containers = page.elements_by_class(classes::ITEM_CARD_IMAGES);
    assert_eq!(containers.len(), 3);

    // One animation round: /img/2.png went to the bottom, /img/1.png is front
    assert_eq!(
        page.child_sources(containers[0]),
        vec![
            Some("/img/2.png".to_string()),
            Some("/img/1.png".to_string())
        ]
    );
    let children = page.children(&containers[0]);
    assert!(page.has_class(&children[1], classes::ITEM_CARD_IMAGE_FRONT));
    assert!(!page.has_class(&children[0], classes::ITEM_CARD_IMAGE_FRONT));

    // Single image never animates, failed listing stays empty
    let single = page.children(&containers[1]);
    assert_eq!(single.len(), 1);
    assert!(!page.has_class(&single[0], classes::ITEM_CARD_IMAGE_FRONT));
    assert!(page.children(&containers[2]).is_empty());
}

#[test]
fn item_sell_scenario_file() {
    let scenario = Scenario::from_json(include_str!("../scenarios/item_sell.json")).unwrap();
    let preview = run(&scenario).unwrap();
    let page = &preview.page;

    // The pdf never reaches the handler
    assert_eq!(
        preview.requests,
        vec![
            "GET image_handler",
            "POST image_handler front.png",
            "POST image_handler back.jpg",
        ]
    );

    let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
    assert_eq!(
        page.child_sources(pictures),
        vec![
            Some("/upload/item-12-a.jpg".to_string()),
            Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        ]
    );

    // Resized to the stacked layout
    let left = page.require_by_id(ids::LEFT_PART).unwrap();
    assert_eq!(page.height(&left), 128.0);

    let input = page.require_by_id(ids::INPUT_CLICK_TO_ADD_PICTURE).unwrap();
    assert_eq!(page.click_count(input), 1);
}

#[test]
fn item_bid_column_layout_follows_details() {
    let scenario = Scenario::from_json(
        r#"{
            "page": "item_bid",
            "panes": { "pictures_width": 200, "details_height": 650 },
            "listings": { "": ["/a.png", "/b.png", "/c.png"] }
        }"#,
    )
    .unwrap();
    let preview = run(&scenario).unwrap();
    let page = &preview.page;

    let left = page.require_by_id(ids::LEFT_PART).unwrap();
    assert_eq!(page.height(&left), 650.0);

    let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
    assert_eq!(page.children(&pictures).len(), 3);
    assert!(page.to_html().contains("<img src=\"/c.png\" class=\"picture\">"));
}

#[test]
fn item_bid_listing_failure_is_silent() {
    let scenario = Scenario::from_json(
        r#"{"page": "item_bid", "failing_listings": [""], "panes": {"pictures_width": 310}}"#,
    )
    .unwrap();
    let preview = run(&scenario).unwrap();
    let page = &preview.page;

    let pictures = page.require_by_id(ids::PICTURES_DIV).unwrap();
    assert!(page.children(&pictures).is_empty());

    // Width outside both breakpoints: no inline height
    let left = page.require_by_id(ids::LEFT_PART).unwrap();
    assert_eq!(page.attribute(&left, "style"), None);
}
