use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a widget stored in the tree arena.
    pub struct WidgetId;
}
