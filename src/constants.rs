//! DOM contract and defaults shared by the page controllers.
//!
//! Element ids and CSS classes must match the markup served by the site;
//! everything else here is a default that `PageConfig` can override.

/// Element ids looked up by the controllers.
pub mod ids {
    /// Pane holding the item images (vertical column on wide screens)
    pub const LEFT_PART: &str = "leftPart";
    /// Pane holding the item details
    pub const RIGHT_PART: &str = "rightPart";
    /// Container receiving the `img.picture` elements
    pub const PICTURES_DIV: &str = "picturesDiv";
    /// Visible "add picture" control
    pub const CLICK_TO_ADD_PICTURE: &str = "clickToAddPicture";
    /// Hidden file input triggered by the "add picture" control
    pub const INPUT_CLICK_TO_ADD_PICTURE: &str = "inputClickToAddPicture";
    /// Radio selecting the purchases search mode
    pub const PURCHASES: &str = "purchases";
    /// Radio selecting the sales search mode
    pub const SALES: &str = "sales";
    /// Fieldset wrapping the purchases filters
    pub const PURCHASES_FIELDSET: &str = "purchasesFieldset";
    /// Fieldset wrapping the sales filters
    pub const SALES_FIELDSET: &str = "salesFieldset";

    /// Filters only meaningful when searching purchases
    pub const PURCHASE_FIELDS: [&str; 3] = ["openedBids", "currentBids", "wonBids"];
    /// Filters only meaningful when searching sales
    pub const SALE_FIELDS: [&str; 3] = ["myCurrentSales", "myPendingSales", "myEndedSales"];
}

/// CSS classes read or written by the controllers.
pub mod classes {
    /// Image shown in the item form pictures pane
    pub const PICTURE: &str = "picture";
    /// Item card on the welcome page
    pub const ITEM_CARD: &str = "itemCardShadowDiv";
    /// Image container inside an item card
    pub const ITEM_CARD_IMAGES: &str = "itemCardImageDiv";
    /// Image inside an item card
    pub const ITEM_CARD_IMAGE: &str = "itemCardImage";
    /// Item card image currently on top and animating
    pub const ITEM_CARD_IMAGE_FRONT: &str = "itemCardImageFront";
    /// Label of a disabled search filter
    pub const LABEL_DISABLED: &str = "labelDisable";
}

/// Default path of the image handler endpoint (relative to the page).
pub const DEFAULT_IMAGE_HANDLER_PATH: &str = "image_handler";

/// Query parameter carrying the item identifier on listing requests.
pub const IDENTIFIER_PARAM: &str = "identifier";

/// Multipart field name carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// MIME prefix accepted by the uploader.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Number of characters prefixing the item identifier in item card element ids.
pub const ITEM_ID_PREFIX_LEN: usize = 1;

/// Pictures pane width (px) selecting the side-by-side column layout.
pub const DEFAULT_COLUMN_WIDTH: f64 = 200.0;

/// Pictures pane width (px) selecting the stacked layout.
pub const DEFAULT_STACKED_WIDTH: f64 = 400.0;

/// Fixed pictures pane height (px) in the stacked layout.
pub const DEFAULT_STACKED_HEIGHT: f64 = 128.0;
