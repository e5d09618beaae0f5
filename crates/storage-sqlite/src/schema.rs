diesel::table! {
    portfolios (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        created_at -> Timestamp,
    }
}

diesel::table! {
    // Legacy column names kept for byte-compatibility with the existing
    // store: cantidad/quantity, precio_compra/purchase price,
    // precio_finish/maturity price, fecha_compra/purchase date,
    // fecha_finish/maturity date. Decimals are stored as TEXT.
    holdings (id) {
        id -> Text,
        portfolio_id -> Text,
        user_id -> Text,
        ticker -> Text,
        cantidad -> Text,
        precio_compra -> Text,
        precio_finish -> Text,
        fecha_compra -> Text,
        fecha_finish -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(holdings -> portfolios (portfolio_id));

diesel::allow_tables_to_appear_in_same_query!(holdings, portfolios);
