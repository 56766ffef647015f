/// Запись списка, с которой работают хранилище, фильтр и агрегатор.
///
/// Поля адресуются по имени, как в `Sortable`/`Searchable` списков.
/// Неизвестное поле возвращает `None` и для поиска считается пустой строкой.
pub trait ListEntity: Clone {
    /// Stable unique key, never changes for the record's lifetime.
    fn entity_id(&self) -> &str;

    /// Ordered list of fields matched by the free-text search.
    fn search_fields() -> &'static [&'static str];

    /// Text view of a named field (search and categorical filters).
    fn get_field_value(&self, field: &str) -> Option<String>;

    /// Numeric view of a named field (sums).
    fn get_numeric_value(&self, _field: &str) -> Option<f64> {
        None
    }

    /// Changes one field in place. Closed-enum fields reject values outside
    /// their domain and leave the record untouched.
    fn set_field_value(&mut self, field: &str, value: &str) -> Result<(), String>;
}
