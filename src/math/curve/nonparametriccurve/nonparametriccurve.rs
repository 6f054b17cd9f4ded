use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point2D {
    x: f64,
    y: f64
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Point2D {
        Point2D { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// 以取樣點表示的曲線。
///
/// `min_x` / `max_x` 只考慮有限值的 x，沒有有限取樣點時回傳 `None`。
pub trait NonparametricCurve {
    fn points(&self) -> Vec<Point2D>;

    fn min_x(&self) -> Option<f64> {
        self.points()
            .iter()
            .map(Point2D::x)
            .filter(|x| x.is_finite())
            .reduce(f64::min)
    }

    fn max_x(&self) -> Option<f64> {
        self.points()
            .iter()
            .map(Point2D::x)
            .filter(|x| x.is_finite())
            .reduce(f64::max)
    }
}

impl NonparametricCurve for Vec<Point2D> {
    fn points(&self) -> Vec<Point2D> {
        self.clone()
    }
}
