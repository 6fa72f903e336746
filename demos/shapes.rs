//! Double dispatch example: collision checks between shapes.

use halo_variant::{alternatives, apply_pair, Variant, VisitPair, Visitor};

#[derive(Debug, Clone, Copy)]
struct Circle {
    x: f64,
    y: f64,
    r: f64,
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[derive(Debug, Clone, Copy)]
struct Point {
    x: f64,
    y: f64,
}

type Shape = Variant<alternatives![Circle, Rect, Point]>;

struct Overlaps;

impl Visitor for Overlaps {
    type Output = bool;
}

fn circle_rect(c: &Circle, r: &Rect) -> bool {
    let nx = c.x.clamp(r.x, r.x + r.w);
    let ny = c.y.clamp(r.y, r.y + r.h);
    (c.x - nx).powi(2) + (c.y - ny).powi(2) <= c.r * c.r
}

fn rect_point(r: &Rect, p: &Point) -> bool {
    p.x >= r.x && p.x <= r.x + r.w && p.y >= r.y && p.y <= r.y + r.h
}

fn circle_point(c: &Circle, p: &Point) -> bool {
    (c.x - p.x).powi(2) + (c.y - p.y).powi(2) <= c.r * c.r
}

impl VisitPair<Circle, Circle> for Overlaps {
    fn visit_pair(&mut self, a: &Circle, b: &Circle) -> bool {
        (a.x - b.x).powi(2) + (a.y - b.y).powi(2) <= (a.r + b.r).powi(2)
    }
}

impl VisitPair<Circle, Rect> for Overlaps {
    fn visit_pair(&mut self, a: &Circle, b: &Rect) -> bool {
        circle_rect(a, b)
    }
}

impl VisitPair<Circle, Point> for Overlaps {
    fn visit_pair(&mut self, a: &Circle, b: &Point) -> bool {
        circle_point(a, b)
    }
}

impl VisitPair<Rect, Circle> for Overlaps {
    fn visit_pair(&mut self, a: &Rect, b: &Circle) -> bool {
        circle_rect(b, a)
    }
}

impl VisitPair<Rect, Rect> for Overlaps {
    fn visit_pair(&mut self, a: &Rect, b: &Rect) -> bool {
        a.x <= b.x + b.w && b.x <= a.x + a.w && a.y <= b.y + b.h && b.y <= a.y + a.h
    }
}

impl VisitPair<Rect, Point> for Overlaps {
    fn visit_pair(&mut self, a: &Rect, b: &Point) -> bool {
        rect_point(a, b)
    }
}

impl VisitPair<Point, Circle> for Overlaps {
    fn visit_pair(&mut self, a: &Point, b: &Circle) -> bool {
        circle_point(b, a)
    }
}

impl VisitPair<Point, Rect> for Overlaps {
    fn visit_pair(&mut self, a: &Point, b: &Rect) -> bool {
        rect_point(b, a)
    }
}

impl VisitPair<Point, Point> for Overlaps {
    fn visit_pair(&mut self, a: &Point, b: &Point) -> bool {
        a.x == b.x && a.y == b.y
    }
}

fn main() {
    println!("Shape Overlap Example");
    println!("=====================");

    let shapes = [
        Shape::new(Circle { x: 0.0, y: 0.0, r: 1.0 }),
        Shape::new(Rect { x: 0.5, y: 0.5, w: 2.0, h: 1.0 }),
        Shape::new(Point { x: 2.0, y: 1.0 }),
        Shape::new(Circle { x: 5.0, y: 5.0, r: 0.5 }),
    ];

    for (i, a) in shapes.iter().enumerate() {
        for (j, b) in shapes.iter().enumerate().skip(i + 1) {
            let hit = apply_pair(Overlaps, a, b);
            println!(
                "  #{i} {:?} vs #{j} {:?}: {}",
                a,
                b,
                if hit { "overlap" } else { "clear" }
            );
        }
    }
}
