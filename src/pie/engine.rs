use ratatui::style::Color;

use crate::domain::{
    Category, CategoryType, PieError, Slice, normalize_count, parse_counts, plan_slices,
    total_completed, total_count, total_left, total_of,
};

#[derive(Clone, Debug, PartialEq)]
pub enum PieChange {
    Categories,
    Length(usize),
    TotalCompleted(Option<f64>),
    TotalCount(Option<f64>),
    TotalLeft(Option<f64>),
    Name(usize),
    Color(usize),
    Kind(usize),
    Count(usize),
}

type ChangeListener = Box<dyn FnMut(&PieChange)>;
type RefreshListener = Box<dyn FnMut()>;
type CountChangedListener = Box<dyn FnMut(&Category, Option<f64>, Option<f64>)>;

pub struct TaskPie {
    categories: Vec<Category>,
    editing: bool,
    change_listener: Option<ChangeListener>,
    refresh_listener: Option<RefreshListener>,
    count_changed: Option<CountChangedListener>,
}

impl Default for TaskPie {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskPie {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            editing: false,
            change_listener: None,
            refresh_listener: None,
            count_changed: None,
        }
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        let mut pie = Self::new();
        pie.categories = categories;
        pie
    }

    pub fn on_change(&mut self, listener: impl FnMut(&PieChange) + 'static) {
        self.change_listener = Some(Box::new(listener));
    }

    pub fn on_refresh(&mut self, listener: impl FnMut() + 'static) {
        self.refresh_listener = Some(Box::new(listener));
    }

    pub fn on_count_changed(
        &mut self,
        listener: impl FnMut(&Category, Option<f64>, Option<f64>) + 'static,
    ) {
        self.count_changed = Some(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    pub fn get_category(&self, index: usize) -> Result<&Category, PieError> {
        self.check_index(index)?;
        Ok(&self.categories[index])
    }

    pub fn counts(&self) -> Vec<Option<f64>> {
        self.categories.iter().map(|c| c.count).collect()
    }

    pub fn total_count(&self) -> Option<f64> {
        total_count(&self.categories)
    }

    pub fn total_of(&self, kind: CategoryType) -> Option<f64> {
        total_of(&self.categories, kind)
    }

    pub fn total_completed(&self) -> Option<f64> {
        total_completed(&self.categories)
    }

    pub fn total_left(&self) -> Option<f64> {
        total_left(&self.categories)
    }

    pub fn plan_slices(&self) -> Vec<Slice> {
        plan_slices(&self.categories)
    }

    pub fn add_category(
        &mut self,
        name: impl Into<String>,
        color: Color,
        kind: Option<CategoryType>,
        count: Option<f64>,
    ) {
        self.categories.push(Category::new(name, color, kind, count));
        self.notify_structure();
    }

    pub fn remove_category(&mut self, index: usize) -> Result<Category, PieError> {
        self.check_index(index)?;
        let removed = self.categories.remove(index);
        self.notify_structure();
        Ok(removed)
    }

    pub fn clear_categories(&mut self) -> Vec<Category> {
        self.replace_categories(None)
    }

    // Wholesale swap of the backing collection. The previous collection is
    // handed back to the caller, still intact but detached from this pie.
    pub fn replace_categories(&mut self, value: Option<Vec<Category>>) -> Vec<Category> {
        let next = value.unwrap_or_default();
        let previous = std::mem::replace(&mut self.categories, next);

        self.request_refresh();
        self.emit_aggregates();
        self.emit(PieChange::Categories);

        previous
    }

    pub fn set_name(&mut self, index: usize, value: impl Into<String>) -> Result<(), PieError> {
        self.check_index(index)?;
        let value = value.into();
        if self.categories[index].name == value {
            return Ok(());
        }

        self.categories[index].name = value;
        self.emit(PieChange::Name(index));
        self.request_refresh();
        Ok(())
    }

    pub fn set_color(&mut self, index: usize, value: Color) -> Result<(), PieError> {
        self.check_index(index)?;
        if self.categories[index].color == value {
            return Ok(());
        }

        self.categories[index].color = value;
        self.emit(PieChange::Color(index));
        self.request_refresh();
        Ok(())
    }

    pub fn set_kind(&mut self, index: usize, value: Option<CategoryType>) -> Result<(), PieError> {
        self.check_index(index)?;
        if self.categories[index].kind == value {
            return Ok(());
        }

        self.categories[index].kind = value;
        self.emit(PieChange::Kind(index));
        self.request_refresh();
        Ok(())
    }

    pub fn set_count(&mut self, index: usize, value: Option<f64>) -> Result<(), PieError> {
        self.check_index(index)?;
        let value = normalize_count(value);
        let old = self.categories[index].count;
        if old == value {
            return Ok(());
        }

        self.categories[index].count = value;
        self.emit(PieChange::Count(index));
        self.request_refresh();
        self.emit_aggregates();

        if let Some(callback) = self.count_changed.as_mut() {
            callback(&self.categories[index], value, old);
        }
        Ok(())
    }

    pub fn increase(&mut self, index: usize, by: f64) -> Result<(), PieError> {
        self.check_index(index)?;
        if by.is_nan() {
            return Err(PieError::InvalidNumber(by.to_string()));
        }

        let current = self.categories[index].count.unwrap_or(0.0);
        self.set_count(index, Some(current + by))
    }

    pub fn decrease(&mut self, index: usize, by: f64) -> Result<(), PieError> {
        self.increase(index, -by)
    }

    // Positional bulk update: None leaves a slot untouched, values past the
    // end of the store are ignored.
    pub fn set_counts(&mut self, values: &[Option<f64>]) -> Result<(), PieError> {
        let len = self.categories.len();
        for (index, value) in values.iter().enumerate().take(len) {
            if let Some(value) = value {
                self.set_count(index, Some(*value))?;
            }
        }
        Ok(())
    }

    pub fn set_counts_text(&mut self, text: &str) -> Result<(), PieError> {
        if text.trim().is_empty() {
            return Ok(());
        }

        // Validate the whole string before touching any count.
        let values = parse_counts(text)?;
        self.set_counts(&values)
    }

    // Refresh requests are suppressed for the duration of the action and a
    // single one fires afterwards, on every exit path including a panic.
    pub fn edit<R>(&mut self, action: impl FnOnce(&mut TaskPie) -> R) -> R {
        struct EditGuard<'a> {
            pie: &'a mut TaskPie,
        }

        impl Drop for EditGuard<'_> {
            fn drop(&mut self) {
                self.pie.editing = false;
                self.pie.request_refresh();
            }
        }

        self.editing = true;
        let mut guard = EditGuard { pie: self };
        let result = action(&mut *guard.pie);
        drop(guard);
        result
    }

    fn check_index(&self, index: usize) -> Result<(), PieError> {
        let len = self.categories.len();
        if index < len {
            Ok(())
        } else {
            Err(PieError::IndexOutOfBounds { index, len })
        }
    }

    fn request_refresh(&mut self) {
        if self.editing {
            return;
        }
        if let Some(listener) = self.refresh_listener.as_mut() {
            listener();
        }
    }

    fn emit(&mut self, change: PieChange) {
        if let Some(listener) = self.change_listener.as_mut() {
            listener(&change);
        }
    }

    fn emit_aggregates(&mut self) {
        let length = self.categories.len();
        let completed = total_completed(&self.categories);
        let count = total_count(&self.categories);
        let left = total_left(&self.categories);

        self.emit(PieChange::Length(length));
        self.emit(PieChange::TotalCompleted(completed));
        self.emit(PieChange::TotalCount(count));
        self.emit(PieChange::TotalLeft(left));
    }

    fn notify_structure(&mut self) {
        self.request_refresh();
        self.emit_aggregates();
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        panic::{AssertUnwindSafe, catch_unwind},
        rc::Rc,
    };

    use ratatui::style::Color;

    use crate::domain::{Category, CategoryType, PieError};

    use super::{PieChange, TaskPie};

    fn sample_pie() -> TaskPie {
        let mut pie = TaskPie::new();
        pie.edit(|p| {
            p.add_category("a", Color::Red, Some(CategoryType::NotStarted), Some(2.0));
            p.add_category("b", Color::Green, Some(CategoryType::InProgress), Some(3.0));
            p.add_category("c", Color::Blue, Some(CategoryType::Completed), Some(5.0));
        });
        pie
    }

    fn record_changes(pie: &mut TaskPie) -> Rc<RefCell<Vec<PieChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        pie.on_change(move |change| sink.borrow_mut().push(change.clone()));
        changes
    }

    fn count_refreshes(pie: &mut TaskPie) -> Rc<Cell<usize>> {
        let refreshes = Rc::new(Cell::new(0));
        let counter = Rc::clone(&refreshes);
        pie.on_refresh(move || counter.set(counter.get() + 1));
        refreshes
    }

    #[test]
    fn test_add_category_emits_aggregates_and_refresh() {
        let mut pie = TaskPie::new();
        let changes = record_changes(&mut pie);
        let refreshes = count_refreshes(&mut pie);

        pie.add_category("a", Color::Red, None, Some(1.0));

        assert_eq!(refreshes.get(), 1);
        assert_eq!(
            *changes.borrow(),
            vec![
                PieChange::Length(1),
                PieChange::TotalCompleted(Some(0.0)),
                PieChange::TotalCount(Some(1.0)),
                PieChange::TotalLeft(Some(0.0)),
            ]
        );
    }

    #[test]
    fn test_set_count_equal_value_is_silent() {
        let mut pie = sample_pie();
        let changes = record_changes(&mut pie);
        let refreshes = count_refreshes(&mut pie);

        pie.set_count(0, Some(2.0)).unwrap();

        assert_eq!(refreshes.get(), 0);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_set_count_fires_count_changed_with_old_and_new() {
        let mut pie = sample_pie();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        pie.on_count_changed(move |category, new_value, old_value| {
            sink.borrow_mut()
                .push((category.name.clone(), new_value, old_value));
        });

        pie.set_count(1, Some(7.0)).unwrap();

        assert_eq!(
            *seen.borrow(),
            vec![("b".to_string(), Some(7.0), Some(3.0))]
        );
    }

    #[test]
    fn test_set_count_nan_becomes_unknown() {
        let mut pie = sample_pie();
        pie.set_count(0, Some(f64::NAN)).unwrap();
        assert_eq!(pie.get_category(0).unwrap().count, None);
        assert_eq!(pie.total_count(), Some(8.0));
    }

    #[test]
    fn test_set_counts_text_blank_token_leaves_count() {
        let mut pie = sample_pie();
        pie.set_counts_text("5, , 3").unwrap();

        assert_eq!(pie.counts(), vec![Some(5.0), Some(3.0), Some(3.0)]);
    }

    #[test]
    fn test_set_counts_text_invalid_token_changes_nothing() {
        let mut pie = sample_pie();
        let refreshes = count_refreshes(&mut pie);

        let err = pie.set_counts_text("5, x, 3").unwrap_err();

        assert_eq!(err, PieError::InvalidNumber("x".to_string()));
        assert_eq!(pie.counts(), vec![Some(2.0), Some(3.0), Some(5.0)]);
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn test_set_counts_extra_values_ignored() {
        let mut pie = sample_pie();
        pie.set_counts(&[Some(1.0), Some(1.0), Some(1.0), Some(9.0)])
            .unwrap();
        assert_eq!(pie.counts(), vec![Some(1.0), Some(1.0), Some(1.0)]);
    }

    #[test]
    fn test_set_counts_text_empty_string_is_noop() {
        let mut pie = sample_pie();
        pie.set_counts_text("   ").unwrap();
        assert_eq!(pie.counts(), vec![Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_increase_treats_unknown_as_zero() {
        let mut pie = sample_pie();
        pie.set_count(0, None).unwrap();
        pie.increase(0, 4.0).unwrap();
        assert_eq!(pie.get_category(0).unwrap().count, Some(4.0));
    }

    #[test]
    fn test_decrease_and_nan_delta() {
        let mut pie = sample_pie();
        pie.decrease(2, 2.0).unwrap();
        assert_eq!(pie.get_category(2).unwrap().count, Some(3.0));

        let err = pie.increase(0, f64::NAN).unwrap_err();
        assert!(matches!(err, PieError::InvalidNumber(_)));
    }

    #[test]
    fn test_remove_category_out_of_range() {
        let mut pie = sample_pie();
        let err = pie.remove_category(3).unwrap_err();
        assert_eq!(err, PieError::IndexOutOfBounds { index: 3, len: 3 });
        assert_eq!(pie.len(), 3);
    }

    #[test]
    fn test_remove_category_returns_removed() {
        let mut pie = sample_pie();
        let removed = pie.remove_category(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(pie.len(), 2);
        assert_eq!(pie.get_category(1).unwrap().name, "c");
    }

    #[test]
    fn test_replace_categories_none_installs_empty_and_detaches() {
        let mut pie = sample_pie();
        let changes = record_changes(&mut pie);

        let previous = pie.replace_categories(None);

        assert!(pie.is_empty());
        assert_eq!(previous.len(), 3);
        assert_eq!(previous[0].name, "a");
        assert!(changes.borrow().contains(&PieChange::Categories));
        assert!(changes.borrow().contains(&PieChange::TotalCount(None)));
    }

    #[test]
    fn test_clear_categories_hands_back_old_collection() {
        let mut pie = sample_pie();
        let old = pie.clear_categories();
        assert_eq!(old.len(), 3);
        assert_eq!(pie.total_count(), None);
        assert!(pie.plan_slices().is_empty());
    }

    #[test]
    fn test_edit_batches_refreshes_into_one() {
        let mut pie = TaskPie::new();
        let refreshes = count_refreshes(&mut pie);

        pie.edit(|p| {
            p.add_category("a", Color::Red, None, Some(1.0));
            p.add_category("b", Color::Green, None, Some(2.0));
            p.set_count(0, Some(9.0)).unwrap();
        });

        assert_eq!(refreshes.get(), 1);
        assert!(!pie.is_editing());
    }

    #[test]
    fn test_edit_panic_still_clears_flag_and_refreshes_once() {
        let mut pie = TaskPie::new();
        let refreshes = count_refreshes(&mut pie);

        let result = catch_unwind(AssertUnwindSafe(|| {
            pie.edit(|p| {
                p.add_category("a", Color::Red, None, Some(1.0));
                panic!("boom");
            });
        }));

        assert!(result.is_err());
        assert!(!pie.is_editing());
        assert_eq!(refreshes.get(), 1);
        assert_eq!(pie.len(), 1);
    }

    #[test]
    fn test_set_name_coerces_and_short_circuits() {
        let mut pie = sample_pie();
        let changes = record_changes(&mut pie);

        pie.set_name(0, "a").unwrap();
        assert!(changes.borrow().is_empty());

        pie.set_name(0, "renamed").unwrap();
        assert_eq!(*changes.borrow(), vec![PieChange::Name(0)]);
        assert_eq!(pie.get_category(0).unwrap().name, "renamed");
    }

    #[test]
    fn test_duplicate_names_are_permitted() {
        let mut pie = sample_pie();
        pie.add_category("a", Color::Cyan, None, Some(1.0));
        assert_eq!(pie.len(), 4);
    }

    #[test]
    fn test_counts_getter_preserves_order() {
        let pie = sample_pie();
        assert_eq!(pie.counts(), vec![Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn test_from_categories_keeps_order_for_slices() {
        let pie = TaskPie::from_categories(vec![
            Category::new("x", Color::Red, None, Some(1.0)),
            Category::new("y", Color::Blue, None, Some(3.0)),
        ]);
        let slices = pie.plan_slices();
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].color, Color::Red);
        assert_eq!(slices[1].color, Color::Blue);
    }
}
