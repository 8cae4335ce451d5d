use eframe::egui::Pos2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Click {
    pub point: Pos2,
}

/// Cursor position plus a single-slot click latch.
///
/// The position is `None` until the cursor enters the canvas and again after
/// it leaves. A new click overwrites an unread one; reading the click always
/// clears it, whether or not the reader ends up using it.
#[derive(Clone, Debug, Default)]
pub struct Mouse {
    point: Option<Pos2>,
    click: Option<Click>,
}

impl Mouse {
    pub fn point(&self) -> Option<Pos2> {
        self.point
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.point = Some(point);
    }

    pub fn leave(&mut self) {
        self.point = None;
    }

    pub fn press(&mut self, point: Pos2) {
        self.click = Some(Click { point });
    }

    pub fn take_click(&mut self) -> Option<Click> {
        self.click.take()
    }
}
