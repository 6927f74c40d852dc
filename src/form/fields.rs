use crate::models::EmbedField;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedFieldRow {
    pub title: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedFieldRow {
    fn is_filled(&self) -> bool {
        !self.title.is_empty() && !self.value.is_empty()
    }

    fn is_blank(&self) -> bool {
        self.title.is_empty() && self.value.is_empty()
    }
}

impl From<&EmbedField> for EmbedFieldRow {
    fn from(field: &EmbedField) -> Self {
        Self {
            title: field.title.clone(),
            value: field.value.clone(),
            inline: field.inline,
        }
    }
}

/// Editable embed field rows. The list always ends in a trailing row the user types
/// into; filling it grows the list, emptying an earlier row shrinks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedFieldList {
    rows: Vec<EmbedFieldRow>,
}

impl Default for EmbedFieldList {
    fn default() -> Self {
        Self {
            rows: vec![EmbedFieldRow::default()],
        }
    }
}

impl EmbedFieldList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[EmbedFieldRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(EmbedFieldRow::is_blank)
    }

    pub fn set_title(&mut self, index: usize, title: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.title = title.into();
            self.input(index);
        }
    }

    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.value = value.into();
            self.input(index);
        }
    }

    pub fn set_inline(&mut self, index: usize, inline: bool) {
        if let Some(row) = self.rows.get_mut(index) {
            row.inline = inline;
        }
    }

    /// Called after the title or value of a row changed. Completing the last row
    /// appends a fresh blank one after it.
    pub fn input(&mut self, index: usize) {
        let is_last = index + 1 == self.rows.len();

        if is_last && self.rows[index].is_filled() {
            self.rows.push(EmbedFieldRow::default());
        }
    }

    /// Called when a row loses focus. An empty row that is not the last one goes away.
    pub fn blur(&mut self, index: usize) {
        let is_last = index + 1 >= self.rows.len();

        if !is_last && self.rows[index].is_blank() {
            self.rows.remove(index);
        }
    }

    pub fn insert_before_trailing(&mut self, field: &EmbedField) {
        let position = self.rows.len().saturating_sub(1);
        self.rows.insert(position, EmbedFieldRow::from(field));
    }

    /// Back to a single blank row.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rows worth sending, in order.
    pub fn fields(&self) -> Vec<EmbedField> {
        self.rows
            .iter()
            .filter(|row| row.title.len() + row.value.len() > 0)
            .map(|row| EmbedField {
                title: row.title.clone(),
                value: row.value.clone(),
                inline: row.inline,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(title: &str, value: &str, inline: bool) -> EmbedField {
        EmbedField {
            title: title.to_string(),
            value: value.to_string(),
            inline,
        }
    }

    #[test]
    fn filling_last_row_appends_blank_row() {
        let mut list = EmbedFieldList::new();

        list.set_title(0, "Title");
        assert_eq!(list.len(), 1, "Half-filled row should not grow the list");

        list.set_value(0, "Value");
        assert_eq!(list.len(), 2);
        assert_eq!(list.rows()[1], EmbedFieldRow::default());
    }

    #[test]
    fn filling_middle_row_does_not_append() {
        let mut list = EmbedFieldList::new();
        list.set_title(0, "a");
        list.set_value(0, "b");
        list.set_title(0, "c");

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn blurring_empty_middle_row_removes_it() {
        let mut list = EmbedFieldList::new();
        list.set_title(0, "a");
        list.set_value(0, "b");
        list.set_title(1, "c");
        list.set_value(1, "d");
        assert_eq!(list.len(), 3);

        list.set_title(0, "");
        list.blur(0);
        assert_eq!(list.len(), 3, "Row with a value left should stay");

        list.set_value(0, "");
        list.blur(0);
        assert_eq!(list.len(), 2);
        assert_eq!(list.rows()[0].title, "c");
    }

    #[test]
    fn blurring_trailing_row_keeps_it() {
        let mut list = EmbedFieldList::new();

        list.blur(0);

        assert_eq!(list.len(), 1);
    }

    #[test]
    fn loaded_fields_go_before_trailing_row_in_order() {
        let mut list = EmbedFieldList::new();
        list.insert_before_trailing(&field("1", "one", false));
        list.insert_before_trailing(&field("2", "two", true));

        assert_eq!(list.len(), 3);
        assert_eq!(list.rows()[2], EmbedFieldRow::default());
        assert_eq!(
            list.fields(),
            vec![field("1", "one", false), field("2", "two", true)]
        );
    }

    #[test]
    fn half_filled_rows_are_sent() {
        let mut list = EmbedFieldList::new();
        list.set_title(0, "only a title");

        assert_eq!(list.fields(), vec![field("only a title", "", false)]);
    }
}
