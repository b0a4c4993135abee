use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::entities::{ParticleKind, UfoType};
use crate::game::World;
use crate::types::Vector2D;

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.set_char(self.cursor_x, self.cursor_y, c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.buffer[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        self.buffer = vec![vec![' '; self.width as usize]; self.height as usize];
        self.cursor_x = 0;
        self.cursor_y = 0;
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer
            .get(y as usize)
            .map(|row| row.iter().collect())
            .unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for row in &self.buffer {
            info!("{}", row.iter().collect::<String>());
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- Viewport: world pixels to terminal cells ---
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    scale_x: f64,
    scale_y: f64,
    offset: Vector2D, // Screen-shake translation, in world pixels
    columns: u16,
    rows: u16,
}

impl Viewport {
    pub fn new(world_width: f64, world_height: f64, columns: u16, rows: u16, offset: Vector2D) -> Self {
        Viewport {
            scale_x: columns as f64 / world_width,
            scale_y: rows as f64 / world_height,
            offset,
            columns,
            rows,
        }
    }

    pub fn to_cell(&self, point: Vector2D) -> Option<(u16, u16)> {
        let x = ((point.x + self.offset.x) * self.scale_x).floor();
        let y = ((point.y + self.offset.y) * self.scale_y).floor();
        if x < 0.0 || y < 0.0 || x >= self.columns as f64 || y >= self.rows as f64 {
            return None;
        }
        Some((x as u16, y as u16))
    }
}

// --- GameGrid for geometric rendering ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn get_char(&self, x: u16, y: u16) -> Option<char> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn clear(&mut self) {
        self.grid = vec![vec![' '; self.width as usize]; self.height as usize];
    }

    pub fn plot(&mut self, view: &Viewport, point: Vector2D, c: char) {
        if let Some((x, y)) = view.to_cell(point) {
            self.set_char(x, y, c);
        }
    }

    /// Bresenham line between two world points, in cell space.
    pub fn line(&mut self, view: &Viewport, from: Vector2D, to: Vector2D, c: char) {
        let (Some((x0, y0)), Some((x1, y1))) = (view.to_cell(from), view.to_cell(to)) else {
            self.plot(view, from, c);
            self.plot(view, to, c);
            return;
        };
        let (mut x, mut y) = (x0 as i32, y0 as i32);
        let (x1, y1) = (x1 as i32, y1 as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_char(x as u16, y as u16, c);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Write every row to the terminal, starting `top` rows down.
    pub fn render(&self, stdout: &mut OutputTarget, top: u16) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y + top))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget, terminal_width: u16, terminal_height: u16) -> io::Result<()> {
        for y in 0..terminal_height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(terminal_width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

/// Project the world onto the grid. Reads state only.
pub fn draw_world(grid: &mut GameGrid, world: &World, shake_offset: Vector2D) {
    let view = Viewport::new(world.width, world.height, grid.width, grid.height, shake_offset);

    for particle in &world.particles {
        let c = match particle.kind {
            ParticleKind::Debris => if particle.fade() > 0.5 { ',' } else { '.' },
            ParticleKind::Spark => '\'',
            ParticleKind::Thruster => '~',
        };
        grid.plot(&view, particle.position, c);
    }

    for effect in &world.explosions {
        let c = if effect.fade() > 0.5 { '#' } else { '+' };
        for line in &effect.lines {
            grid.line(&view, effect.position, effect.line_end(line), c);
        }
    }

    for asteroid in &world.asteroids {
        let (sin, cos) = asteroid.angle.sin_cos();
        let outline: Vec<Vector2D> = asteroid
            .vertices
            .iter()
            .map(|v| asteroid.position.add(Vector2D::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)))
            .collect();
        for (i, &from) in outline.iter().enumerate() {
            let to = outline[(i + 1) % outline.len()];
            grid.line(&view, from, to, '@');
        }
    }

    for power_up in &world.power_ups {
        grid.plot(&view, power_up.position, power_up.power_up_type.display_char());
    }

    for ufo in &world.ufos {
        let half = ufo.size();
        let body = match ufo.ufo_type {
            UfoType::Large => '=',
            UfoType::Small => '-',
        };
        grid.line(
            &view,
            ufo.position.sub(Vector2D::new(half, 0.0)),
            ufo.position.add(Vector2D::new(half, 0.0)),
            body,
        );
        grid.plot(&view, ufo.position, 'U');
    }

    for bullet in &world.ufo_bullets {
        grid.plot(&view, bullet.position, 'o');
    }

    for bullet in &world.bullets {
        grid.plot(&view, bullet.position, '*');
    }

    if !world.game_over {
        draw_ship(grid, &view, world);
    }
}

fn draw_ship(grid: &mut GameGrid, view: &Viewport, world: &World) {
    let ship = &world.ship;
    let size = crate::constants::SHIP_SIZE;
    let local = [
        Vector2D::new(size, 0.0),
        Vector2D::new(-size, -size / 1.5),
        Vector2D::new(-size / 2.0, 0.0),
        Vector2D::new(-size, size / 1.5),
    ];
    let (sin, cos) = ship.rotation.sin_cos();
    let hull: Vec<Vector2D> = local
        .iter()
        .map(|v| ship.position.add(Vector2D::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)))
        .collect();
    let hull_char = if world.has_power_up(crate::upgrades::PowerUpType::Shield) { 'O' } else { 'A' };
    for (i, &from) in hull.iter().enumerate() {
        grid.line(view, from, hull[(i + 1) % hull.len()], hull_char);
    }
    if ship.thrusting {
        grid.plot(view, ship.tail(), '^');
    }
}

/// Status line shown above the field.
pub fn hud_line(world: &World) -> String {
    let mut line = format!(
        "Score: {}  Lives: {}  Level: {}  High Score: {}",
        world.score, world.lives, world.level, world.high_score
    );
    for active in &world.active_power_ups {
        line.push_str(&format!("  [{} {:>3}%]", active.power_up_type.label(), (active.remaining() * 100.0).round()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_scales_world_to_cells() {
        let view = Viewport::new(800.0, 600.0, 80, 30, Vector2D::ZERO);
        assert_eq!(view.to_cell(Vector2D::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(view.to_cell(Vector2D::new(405.0, 305.0)), Some((40, 15)));
        assert_eq!(view.to_cell(Vector2D::new(800.0, 10.0)), None);
        assert_eq!(view.to_cell(Vector2D::new(-1.0, 10.0)), None);
    }

    #[test]
    fn ship_is_drawn_and_hidden_on_game_over() {
        let mut world = World::empty(800.0, 600.0);
        let mut grid = GameGrid::new(80, 30);
        draw_world(&mut grid, &world, Vector2D::ZERO);
        assert!(grid.grid.iter().flatten().any(|&c| c == 'A'));

        world.game_over = true;
        grid.clear();
        draw_world(&mut grid, &world, Vector2D::ZERO);
        assert!(!grid.grid.iter().flatten().any(|&c| c == 'A'));
    }

    #[test]
    fn line_covers_both_ends() {
        let view = Viewport::new(100.0, 100.0, 10, 10, Vector2D::ZERO);
        let mut grid = GameGrid::new(10, 10);
        grid.line(&view, Vector2D::new(5.0, 5.0), Vector2D::new(95.0, 55.0), '#');
        assert_eq!(grid.get_char(0, 0), Some('#'));
        assert_eq!(grid.get_char(9, 5), Some('#'));
    }

    #[test]
    fn grid_renders_below_the_hud() {
        let view = Viewport::new(100.0, 100.0, 10, 4, Vector2D::ZERO);
        let mut grid = GameGrid::new(10, 4);
        grid.plot(&view, Vector2D::new(35.0, 10.0), '*');
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(10, 5));
        grid.render(&mut target, 1).unwrap();
        let OutputTarget::ScreenBuffer(sb) = &target else { unreachable!() };
        assert_eq!(sb.row(0), " ".repeat(10));
        assert_eq!(sb.row(1), "   *      ");
    }

    #[test]
    fn hud_lists_active_power_ups() {
        let mut world = World::empty(800.0, 600.0);
        crate::upgrades::apply_power_up(&mut world.active_power_ups, crate::upgrades::PowerUpType::RapidFire);
        assert!(hud_line(&world).contains("Rapid Fire 100%"));
    }
}
