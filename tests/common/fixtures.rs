//! Static vendor corpora used across harnesses.
//!
//! Values are taken from the shapes real order exports use: Shopee's
//! `product_info` blob, Lazada's dash-delimited `sellerSku` and TikTok's
//! header plus description row layout.

/// Shopee `product_info` blobs paired with the number of product entries
/// each should expand to.
pub const SHOPEE_PRODUCT_INFO: &[(&str, usize)] = &[
    (
        "[1]Nama Produk: X;Nama Variasi: Blue, L;Jumlah: 2;Nomor Referensi SKU: ABC;",
        1,
    ),
    (
        "[1] Nama Produk:Kaos Polos;Nama Variasi:Hitam,XL;Harga: Rp 45.000;Jumlah: 1;Nomor Referensi SKU: KP-01; \
         [2] Nama Produk:Kaos Polos;Nama Variasi:Putih,M;Harga: Rp 45.000;Jumlah: 3;Nomor Referensi SKU: KP-02;",
        2,
    ),
    (
        "[1]Nama Produk: Topi;Jumlah: 1;Nomor Referensi SKU: TP9; [2]Nama Produk: Tas;Nama Variasi: Merah;Jumlah: 1; [3]Nama Produk: Sabuk;Nama Variasi: ,S;Jumlah: 4;Nomor Referensi SKU: SB;",
        3,
    ),
    ("Nama Produk: Tanpa Penanda;Nama Variasi: Hijau, 40;Jumlah: 1;Nomor Referensi SKU: TN;", 1),
    ("", 0),
];

/// Lazada `sellerSku` values and the `(sku, warna, size)` they split into.
/// `None` for size means it is taken from `variation`.
pub const LAZADA_SELLER_SKUS: &[(&str, &str, &str, Option<&str>)] = &[
    ("BARBIE 533-BIRU TOSCA", "barbie 533", "biru tosca", None),
    ("BARBIE 533-BIRU-UE: 21", "barbie 533", "biru", Some("21")),
    ("SEPATU 12-HITAM PEKAT-UE:39", "sepatu 12", "hitam", Some("39")),
    ("A-B-C-D", "a", "b", None),
    ("PLAIN", "PLAIN", "", None),
];

pub const SHOPEE_HEADER: [&str; 4] = [
    "order_sn",
    "tracking_number",
    "order_creation_date",
    "product_info",
];

pub const LAZADA_HEADER: [&str; 5] = [
    "orderNumber",
    "trackingCode",
    "createTime",
    "sellerSku",
    "variation",
];

pub const TIKTOK_HEADER: [&str; 6] = [
    "Order ID",
    "Order Status",
    "Seller SKU",
    "Variation",
    "Quantity",
    "Created Time",
];

/// TikTok puts the tracking column far to the right; appended to
/// [`TIKTOK_HEADER`] so column lookup by name is exercised.
pub const TIKTOK_TRACKING_HEADER: &str = "Tracking ID";

pub const TIKTOK_DESCRIPTION: [&str; 7] = [
    "Platform unique order ID.",
    "Current order status.",
    "Seller SKU",
    "Product variation",
    "Product quantity",
    "Time the order was created",
    "Tracking ID",
];

/// `(Order ID, Seller SKU, Variation, Quantity, Created Time, Tracking ID)`.
pub const TIKTOK_ORDERS: &[[&str; 6]] = &[
    ["5770001", "KEMEJA-01", "Navy, L", "1", "05/03/2024 10:15:00", "JX001"],
    ["5770002", "kemeja-02", "Biru Muda, XL", "2", "2024-03-06", "JX002"],
    ["5770003", "CELANA", "Hitam", "1", "07/03/2024", "JX003"],
];
