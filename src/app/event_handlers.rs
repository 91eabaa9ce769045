use crossterm::event::KeyCode;

use super::App;

impl App {
    // Returns true when the app should exit.
    pub(super) fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                self.render_needed.set(true);
            }
            KeyCode::Char('r') => {
                self.reset_counts();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                if self.selected_index > 0 {
                    self.selected_index -= 1;
                }
                self.render_needed.set(true);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected_index + 1 < self.pie.len() {
                    self.selected_index += 1;
                }
                self.render_needed.set(true);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                let _ = self.pie.increase(self.selected_index, 1.0);
            }
            KeyCode::Char('-') => {
                let _ = self.pie.decrease(self.selected_index, 1.0);
            }
            _ => {}
        }
        false
    }
}
