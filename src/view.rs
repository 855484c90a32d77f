//! The camera: pan, zoom, and aspect-correct framing, with an exact inverse.
//!
//! Screen-space interaction (drawing, stamping, zoom-to-cursor) and rendering
//! must agree on one projection. The forward path maps a screen pixel through
//! aspect scaling, zoom, and pan to a grid UV; the inverse path is the same
//! chain run backwards, plus rejection of points that fall in the
//! letterbox/pillarbox bars. Both directions go through [`ViewTransform::final_scale`]
//! so they can never drift apart; the renderer receives that same scale as a
//! uniform rather than recomputing it.
//!
//! Framing blends between two regimes as zoom increases: at zoom 1 the grid
//! is fitted entirely inside the window (bars on the narrow axis), and by
//! `transition_zoom` the content has grown to fill the window with the bars
//! cropped away. The blend factor is a smoothstep of the zoom level.
//!
//! Screen y is taken top-down from the windowing layer and flipped once on
//! entry; all UV math here is bottom-up (v = 0 at the bottom edge).

use cgmath::Vector2;

/// Lower zoom bound. The upper bound depends on grid size; see
/// [`ViewTransform::max_zoom`].
pub const MIN_ZOOM: f64 = 0.1;

/// How the grid is framed inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// Always letterbox/pillarbox: the full grid stays visible at zoom 1 and
    /// the bars never crop away.
    Fit,
    /// Letterbox at zoom 1, smoothly cropping to fill the window as zoom
    /// approaches the transition level.
    #[default]
    FitCrop,
}

/// Camera state and the projection shared by rendering and input.
#[derive(Debug, Clone)]
pub struct ViewTransform {
    pan: Vector2<f64>,
    zoom: f64,
    window_width: u32,
    window_height: u32,
    grid_width: u32,
    grid_height: u32,
    max_zoom: f64,
    framing: Framing,
}

impl ViewTransform {
    pub fn new(window_width: u32, window_height: u32, grid_width: u32, grid_height: u32) -> Self {
        let mut view = Self {
            pan: Vector2::new(0.0, 0.0),
            zoom: 1.0,
            window_width: window_width.max(1),
            window_height: window_height.max(1),
            grid_width: grid_width.max(1),
            grid_height: grid_height.max(1),
            max_zoom: MIN_ZOOM,
            framing: Framing::default(),
        };
        view.max_zoom = view.compute_max_zoom();
        view
    }

    /// Pan offset in grid UV space.
    pub fn pan_uv(&self) -> Vector2<f64> {
        self.pan
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Dimension-dependent zoom ceiling: never closer than ten cells across
    /// the larger axis, floored so the clamp interval stays non-empty on
    /// tiny grids.
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn framing(&self) -> Framing {
        self.framing
    }

    pub fn set_framing(&mut self, framing: Framing) {
        self.framing = framing;
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    fn compute_max_zoom(&self) -> f64 {
        (self.grid_width.max(self.grid_height) as f64 / 10.0).max(MIN_ZOOM)
    }

    /// Scale that fits the whole grid inside the window, barring the
    /// mismatched axis.
    fn fit_scale(&self) -> Vector2<f64> {
        let window_aspect = self.window_width as f64 / self.window_height as f64;
        let grid_aspect = self.grid_width as f64 / self.grid_height as f64;
        if window_aspect > grid_aspect {
            Vector2::new(grid_aspect / window_aspect, 1.0)
        } else {
            Vector2::new(1.0, window_aspect / grid_aspect)
        }
    }

    /// Zoom level at which fit-scaled content exactly fills the window on
    /// the barred axis.
    pub fn transition_zoom(&self) -> f64 {
        let fit = self.fit_scale();
        1.0 / fit.x.min(fit.y)
    }

    /// The single scale both the render path and the input path use:
    /// fit scale blended toward (1, 1) by a smoothstep of zoom.
    pub fn final_scale(&self) -> Vector2<f64> {
        let fit = self.fit_scale();
        match self.framing {
            Framing::Fit => fit,
            Framing::FitCrop => {
                let t = smoothstep(1.0, self.transition_zoom(), self.zoom);
                Vector2::new(fit.x + (1.0 - fit.x) * t, fit.y + (1.0 - fit.y) * t)
            }
        }
    }

    /// Screen pixel to normalized window coordinates, y flipped to bottom-up.
    fn unscaled_uv(&self, screen_x: f64, screen_y: f64) -> Vector2<f64> {
        Vector2::new(
            screen_x / self.window_width as f64,
            1.0 - screen_y / self.window_height as f64,
        )
    }

    /// Forward transform through aspect scaling, zoom, and pan: screen pixel
    /// to grid UV. No bounds handling; see [`Self::screen_to_cell`] for the
    /// rejecting variant used by interaction.
    pub fn screen_to_texture(&self, screen_x: f64, screen_y: f64) -> Vector2<f64> {
        let uv = self.unscaled_uv(screen_x, screen_y);
        let scale = self.final_scale();
        let corrected = Vector2::new(
            (uv.x - 0.5) * scale.x + 0.5,
            (uv.y - 0.5) * scale.y + 0.5,
        );
        corrected / self.zoom + self.pan
    }

    /// Inverse interaction mapping: screen pixel to grid cell.
    ///
    /// Returns `None` for pixels in the letterbox/pillarbox bars, and for
    /// pixels whose UV lands outside the grid (panned off the board). The
    /// bar test and the UV math use the same `final_scale` as rendering.
    pub fn screen_to_cell(&self, screen_x: f64, screen_y: f64) -> Option<(u32, u32)> {
        let uv = self.unscaled_uv(screen_x, screen_y);
        let scale = self.final_scale();
        if (uv.x - 0.5).abs() > scale.x * 0.5 || (uv.y - 0.5).abs() > scale.y * 0.5 {
            return None;
        }

        let tex = self.screen_to_texture(screen_x, screen_y);
        if tex.x < 0.0 || tex.x >= 1.0 || tex.y < 0.0 || tex.y >= 1.0 {
            return None;
        }

        let x = ((tex.x * self.grid_width as f64).floor() as u32).min(self.grid_width - 1);
        let y = ((tex.y * self.grid_height as f64).floor() as u32).min(self.grid_height - 1);
        Some((x, y))
    }

    /// Project a cell's center to screen pixels. Exact algebraic inverse of
    /// [`Self::screen_to_cell`]; the result may fall outside the window or
    /// inside the bars when the cell is not currently visible.
    pub fn cell_to_screen(&self, x: u32, y: u32) -> (f64, f64) {
        let tex = Vector2::new(
            (x as f64 + 0.5) / self.grid_width as f64,
            (y as f64 + 0.5) / self.grid_height as f64,
        );
        let corrected = (tex - self.pan) * self.zoom;
        let scale = self.final_scale();
        let unscaled = Vector2::new(
            (corrected.x - 0.5) / scale.x + 0.5,
            (corrected.y - 0.5) / scale.y + 0.5,
        );
        (
            unscaled.x * self.window_width as f64,
            (1.0 - unscaled.y) * self.window_height as f64,
        )
    }

    /// Drag the view by a screen-space delta. Dragging right moves the view
    /// left in grid space; screen y grows downward while grid v grows upward,
    /// hence the sign split.
    pub fn pan(&mut self, screen_dx: f64, screen_dy: f64) {
        self.pan.x -= screen_dx / (self.window_width as f64 * self.zoom);
        self.pan.y += screen_dy / (self.window_height as f64 * self.zoom);
    }

    /// Multiply zoom by `factor`, clamped, keeping the grid point under the
    /// cursor fixed: the UV at (screen_x, screen_y) is captured before the
    /// zoom change and pan absorbs the difference afterwards.
    pub fn zoom_at(&mut self, screen_x: f64, screen_y: f64, factor: f64) {
        let before = self.screen_to_texture(screen_x, screen_y);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, self.max_zoom);
        let after = self.screen_to_texture(screen_x, screen_y);
        self.pan += before - after;
    }

    /// Identity pan, zoom 1.
    pub fn reset(&mut self) {
        self.pan = Vector2::new(0.0, 0.0);
        self.zoom = 1.0;
    }

    /// Window resized: the transform recomputes its bars, pan and zoom keep
    /// their logical position.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width.max(1);
        self.window_height = height.max(1);
    }

    /// Grid replaced: recompute the zoom ceiling and return to the home view.
    pub fn set_grid_size(&mut self, grid_width: u32, grid_height: u32) {
        self.grid_width = grid_width.max(1);
        self.grid_height = grid_height.max(1);
        self.max_zoom = self.compute_max_zoom();
        self.reset();
        self.zoom = self.zoom.clamp(MIN_ZOOM, self.max_zoom);
    }
}

/// Hermite smoothstep of x over [a, b]. Degenerate intervals (equal grid and
/// window aspects make b == a) collapse to a step at b.
fn smoothstep(a: f64, b: f64, x: f64) -> f64 {
    if b <= a {
        return if x >= b { 1.0 } else { 0.0 };
    }
    let u = ((x - a) / (b - a)).clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 800x600 window over a 300x200 grid: grid is wider (1.5 vs 1.33), so
    // the fit regime letterboxes on y.
    fn letterboxed() -> ViewTransform {
        ViewTransform::new(800, 600, 300, 200)
    }

    // 800x600 window over a square grid: pillarbox on x.
    fn pillarboxed() -> ViewTransform {
        ViewTransform::new(800, 600, 200, 200)
    }

    fn assert_close(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} vs {b}");
    }

    #[test]
    fn fit_scale_bars_the_mismatched_axis() {
        let view = letterboxed();
        let scale = view.final_scale();
        assert_close(scale.x, 1.0, 1e-12);
        assert_close(scale.y, (800.0 / 600.0) / 1.5, 1e-12);

        let view = pillarboxed();
        let scale = view.final_scale();
        assert_close(scale.x, 0.75, 1e-12);
        assert_close(scale.y, 1.0, 1e-12);
    }

    #[test]
    fn scale_crops_to_fill_past_the_transition_zoom() {
        let mut view = letterboxed();
        let transition = view.transition_zoom();
        assert!(transition > 1.0);

        view.zoom_at(400.0, 300.0, transition * 2.0);
        let scale = view.final_scale();
        assert_close(scale.x, 1.0, 1e-12);
        assert_close(scale.y, 1.0, 1e-12);

        // Halfway through the blend both regimes contribute.
        let mut view = letterboxed();
        view.zoom_at(400.0, 300.0, (1.0 + transition) / 2.0);
        let scale = view.final_scale();
        assert!(scale.y > (800.0 / 600.0) / 1.5 && scale.y < 1.0);
    }

    #[test]
    fn fit_only_framing_never_crops() {
        let mut view = letterboxed();
        view.set_framing(Framing::Fit);
        view.zoom_at(400.0, 300.0, 10.0);
        let scale = view.final_scale();
        assert_close(scale.y, (800.0 / 600.0) / 1.5, 1e-12);
    }

    #[test]
    fn equal_aspects_degenerate_cleanly() {
        let view = ViewTransform::new(400, 400, 100, 100);
        assert_close(view.transition_zoom(), 1.0, 1e-12);
        let scale = view.final_scale();
        assert!(scale.x.is_finite() && scale.y.is_finite());
        assert_close(scale.x, 1.0, 1e-12);
        assert_close(scale.y, 1.0, 1e-12);
    }

    #[test]
    fn center_pixel_hits_center_cell_at_home_view() {
        let view = letterboxed();
        assert_eq!(view.screen_to_cell(400.0, 300.0), Some((150, 100)));
    }

    #[test]
    fn letterbox_bars_reject_clicks() {
        // Pillarbox: bars cover x < 100 and x > 700 at zoom 1.
        let view = pillarboxed();
        assert_eq!(view.screen_to_cell(50.0, 300.0), None);
        assert_eq!(view.screen_to_cell(750.0, 300.0), None);
        assert!(view.screen_to_cell(400.0, 300.0).is_some());

        // Letterbox: 600x800 window over the same square grid bars y.
        let view = ViewTransform::new(600, 800, 200, 200);
        assert_eq!(view.screen_to_cell(300.0, 50.0), None);
        assert_eq!(view.screen_to_cell(300.0, 750.0), None);
        assert!(view.screen_to_cell(300.0, 400.0).is_some());
    }

    #[test]
    fn off_grid_uv_is_rejected_after_panning_away() {
        let mut view = letterboxed();
        // Drag far enough left that the visible region is past the grid edge.
        view.pan(-2000.0, 0.0);
        assert_eq!(view.screen_to_cell(400.0, 300.0), None);
    }

    #[test]
    fn forward_inverse_round_trip_is_exact() {
        let mut view = letterboxed();
        // Rows near the grid's top and bottom edges sit beyond the bars at
        // zoom 1 (the barred axis shows the middle band), so sample cells
        // strictly inside the visible region.
        let cells = [(0, 100), (37, 50), (150, 100), (299, 150)];
        for &(x, y) in &cells {
            let (sx, sy) = view.cell_to_screen(x, y);
            assert_eq!(view.screen_to_cell(sx, sy), Some((x, y)));
        }

        // Same property in a zoomed, panned, mid-blend state.
        view.zoom_at(400.0, 300.0, 1.06);
        view.pan(30.0, -20.0);
        for &(x, y) in &[(150, 100), (160, 105), (140, 95)] {
            let (sx, sy) = view.cell_to_screen(x, y);
            assert_eq!(view.screen_to_cell(sx, sy), Some((x, y)));
        }
    }

    #[test]
    fn zoom_keeps_the_cell_under_the_cursor() {
        let points = [(400.0, 300.0), (520.0, 330.0), (300.0, 280.0)];
        let factors = [0.5, 0.8, 1.1, 2.0];
        for &(sx, sy) in &points {
            for &factor in &factors {
                let mut view = letterboxed();
                view.zoom_at(400.0, 300.0, 1.3);
                view.pan(15.0, -10.0);

                let before = view.screen_to_cell(sx, sy).expect("point starts visible");
                view.zoom_at(sx, sy, factor);
                let after = view.screen_to_cell(sx, sy).expect("point stays visible");

                let dx = (before.0 as i64 - after.0 as i64).abs();
                let dy = (before.1 as i64 - after.1 as i64).abs();
                assert!(dx <= 1 && dy <= 1, "cell drifted: {before:?} -> {after:?}");
            }
        }
    }

    #[test]
    fn zoom_is_clamped_at_both_ends() {
        let mut view = letterboxed();
        for _ in 0..100 {
            view.zoom_at(400.0, 300.0, 0.5);
        }
        assert_close(view.zoom(), MIN_ZOOM, 1e-12);

        for _ in 0..100 {
            view.zoom_at(400.0, 300.0, 2.0);
        }
        assert_close(view.zoom(), 30.0, 1e-12); // max(300, 200) / 10
    }

    #[test]
    fn pan_sign_convention_drags_content_with_the_cursor() {
        let mut view = letterboxed();
        let before = view.screen_to_texture(400.0, 300.0);
        view.pan(10.0, 0.0);
        let after = view.screen_to_texture(400.0, 300.0);
        // Dragging right moves the view left in grid space.
        assert!(after.x < before.x);
        assert!(view.pan_uv().x < 0.0);
    }

    #[test]
    fn window_resize_preserves_pan_and_zoom() {
        let mut view = letterboxed();
        view.zoom_at(400.0, 300.0, 1.5);
        view.pan(25.0, 40.0);
        let (pan, zoom) = (view.pan_uv(), view.zoom());

        view.set_window_size(1024, 768);
        assert_eq!(view.pan_uv(), pan);
        assert_close(view.zoom(), zoom, 1e-12);
    }

    #[test]
    fn grid_resize_resets_the_view() {
        let mut view = letterboxed();
        view.zoom_at(400.0, 300.0, 3.0);
        view.pan(100.0, 50.0);

        view.set_grid_size(400, 100);
        assert_eq!(view.pan_uv(), Vector2::new(0.0, 0.0));
        assert_close(view.zoom(), 1.0, 1e-12);
        assert_close(view.max_zoom(), 40.0, 1e-12);
    }

    #[test]
    fn tiny_grids_keep_a_valid_zoom_interval() {
        let mut view = letterboxed();
        view.set_grid_size(3, 3);
        assert!(view.max_zoom() >= MIN_ZOOM);
        assert!(view.zoom() <= view.max_zoom());
    }

    #[test]
    fn smoothstep_is_clamped_and_smooth() {
        assert_close(smoothstep(1.0, 2.0, 0.5), 0.0, 1e-12);
        assert_close(smoothstep(1.0, 2.0, 2.5), 1.0, 1e-12);
        assert_close(smoothstep(1.0, 2.0, 1.5), 0.5, 1e-12);
        // Degenerate interval steps at b instead of dividing by zero.
        assert_close(smoothstep(1.0, 1.0, 0.9), 0.0, 1e-12);
        assert_close(smoothstep(1.0, 1.0, 1.0), 1.0, 1e-12);
    }
}
