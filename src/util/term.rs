// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Terminal emulator control sequences.
//!
//! Ratatui only paints cells inside the alternate screen; the emulator's own
//! window background is out of its reach and is set here instead, via the
//! OSC 11/111 escape pair. Widely supported (XTerm, iTerm2, Alacritty,
//! Kitty); emulators that ignore OSC 11 simply keep their default
//! background.

use std::io::{self, Write};

/// Sets the emulator's window background to `hex_colour` (e.g. `"#18201c"`).
///
/// Flushes stdout so the colour is applied before the first frame is drawn.
pub(crate) fn set_background(hex_colour: &str) {
    print!("\x1b]11;{hex_colour}\x07");
    io::stdout().flush().ok();
}

/// Reverts the window background to the emulator's configured default.
/// Called on teardown, paired with [`set_background`].
pub(crate) fn reset_background() {
    print!("\x1b]111\x07");
    io::stdout().flush().ok();
}
