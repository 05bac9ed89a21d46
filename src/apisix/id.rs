use uuid::Uuid;

const ROUTE_ID_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_0c3e_52a4_4d0e_9a8b_11c2_d6f4_7e01);
const UPSTREAM_ID_NAMESPACE: Uuid = Uuid::from_u128(0x0d8e_4a71_93b6_4f25_b1c7_5e3a_28d9_c402);

/// Stable identifier of a route derived from its composed name.
pub fn route_id(route_name: &str) -> String {
    Uuid::new_v5(&ROUTE_ID_NAMESPACE, route_name.as_bytes()).to_string()
}

/// Stable identifier of an upstream derived from its composed name.
pub fn upstream_id(upstream_name: &str) -> String {
    Uuid::new_v5(&UPSTREAM_ID_NAMESPACE, upstream_name.as_bytes()).to_string()
}
