// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Qgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of qgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::ops::{Add, Mul, Sub};

use serde::Serialize;

/// A canvas position in pixels; `y` grows downwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `distance` away from `self` in direction `angle` (radians).
    pub fn polar(self, angle: f64, distance: f64) -> Self {
        Self::new(self.x + angle.cos() * distance, self.y + angle.sin() * distance)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance(self, other: Self) -> f64 {
        (other - self).length()
    }

    pub fn angle_to(self, other: Self) -> f64 {
        let delta = other - self;
        delta.dy.atan2(delta.dx)
    }
}

/// A displacement between two points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn length(self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// Unit vector rotated a quarter turn counter-clockwise; zero for a zero vector.
    pub fn unit_normal(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::default();
        }
        Self::new(-self.dy / length, self.dx / length)
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, rhs: Vector) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.dx * rhs, self.dy * rhs)
    }
}

/// Axis-aligned canvas bounds; positions are clamped into `[margin, size - margin]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn clamp(self, point: Point, margin: f64) -> Point {
        Point::new(clamp_axis(point.x, margin, self.width), clamp_axis(point.y, margin, self.height))
    }
}

// A canvas narrower than two margins pins the axis to its middle.
fn clamp_axis(value: f64, margin: f64, size: f64) -> f64 {
    let (low, high) = (margin, size - margin);
    if low > high {
        return size / 2.0;
    }
    value.clamp(low, high)
}
