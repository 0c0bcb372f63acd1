/*

    Provide utilities to parse scene JSON files.

    This format currently assumes:
        - Numbers may be given as numbers or encapsulated in quotes e.g. "6"
        - Vector data fields are in format "<a> <a> <a>" where <a> is integer or float,
          an array [<a>, <a>, <a>] works as well

    e.g. In JSON file both
    "FovY": "30" and "FovY": 30
    works as fovy: Float in source code

    @date: 2 Oct, 2025
    @author: bartu
*/

use std::fmt::{self};
use std::marker::PhantomData;
use std::str::FromStr;
use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Deserializer};
use serde::de::{self, Visitor, SeqAccess};

use crate::prelude::*;
use crate::scene::{RootScene};
use crate::numeric::{Int, Float};

pub fn parse_scene_json(path: &str) -> Result<RootScene, Box<dyn std::error::Error>> {

    let span = tracing::span!(tracing::Level::INFO, "load_scene");
    let _enter = span.enter();

    // Open file
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    debug!("Reading file from {}", path);

    // Parse JSON into Scene
    let root: RootScene = serde_json::from_reader(reader)?;
    root.camera.validate()?;
    Ok(root)
}

pub(crate) fn deser_int<'de, D>(deserializer: D) -> Result<Int, D::Error>
where
    D: Deserializer<'de>,
{
    /*
        Deserialize integer type given as either string or number in JSON
    */
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_i64()
            .map(|v| v as Int)
            .ok_or_else(|| de::Error::custom("Invalid integer")),
        serde_json::Value::String(s) => s.parse::<Int>()
            .map_err(|_| de::Error::custom("Failed to parse integer from string")),
        t => Err(de::Error::custom(format!("Expected int or string, found {t}"))),
    }
}

// Handles floats as string or number
pub(crate) fn deser_float<'de, D>(deserializer: D) -> Result<Float, D::Error>
where
    D: Deserializer<'de>,
{
    let s: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match s {
        serde_json::Value::Number(n) => n.as_f64()
            .map(|v| v as Float)
            .ok_or_else(|| de::Error::custom("Invalid float")),
        serde_json::Value::String(s) => s.parse::<Float>()
            .map_err(|_| de::Error::custom("Failed to parse float from string")),
        t => Err(de::Error::custom(format!("Expected float or string, found {t}"))),
    }
}

pub(crate) fn deser_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolVisitor;

    impl<'de> serde::de::Visitor<'de> for BoolVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a boolean or a string containing true/false")
        }

        fn visit_bool<E>(self, v: bool) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            match v.to_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(E::custom(format!("invalid bool '{}'", v))),
            }
        }

        fn visit_u64<E>(self, v: u64) -> Result<bool, E>
        where
            E: serde::de::Error,
        {
            Ok(v != 0)
        }
    }

    deserializer.deserialize_any(BoolVisitor)
}

pub trait From3<T>: Sized {
    fn new(x: T, y: T, z: T) -> Self;
}

impl From3<f64> for bevy_math::DVec3 {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self::new(x, y, z)
    }
}

pub(crate) fn deser_vec3<'de, D, V, F>(deserializer: D) -> Result<V, D::Error>
where
    D: Deserializer<'de>,
    F: Deserialize<'de> + FromStr,
    F::Err: fmt::Display,
    V: From3<F>,
{
    struct Vec3Visitor<V, F>(PhantomData<(V, F)>);

    impl<'de, V, F> Visitor<'de> for Vec3Visitor<V, F>
    where
        F: Deserialize<'de> + FromStr,
        F::Err: fmt::Display,
        V: From3<F>,
    {
        type Value = V;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a Vec3 as a string 'x y z' or an array [x, y, z]")
        }

        // Given "X Y Z"
        fn visit_str<E>(self, value: &str) -> Result<V, E>
        where
            E: de::Error,
        {
            let [x, y, z] = parse_numbers_str::<F, 3>(value).map_err(de::Error::custom)?;
            Ok(V::new(x, y, z))
        }

        // Given [X, Y, Z]
        fn visit_seq<A>(self, mut seq: A) -> Result<V, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let x: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let y: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            let z: F = seq
                .next_element()?
                .ok_or_else(|| de::Error::custom("Expected 3 elements in Vec3 array"))?;
            if seq.next_element::<F>()?.is_some() {
                return Err(de::Error::custom("Expected only 3 elements in Vec3 array"));
            }
            Ok(V::new(x, y, z))
        }
    }

    deserializer.deserialize_any(Vec3Visitor(PhantomData))
}

// Screen positions, given as "x y" or [x, y]
pub(crate) fn deser_vec2<'de, D>(deserializer: D) -> Result<Vector2, D::Error>
where
    D: Deserializer<'de>,
{
    let [x, y] = deser_pair::<D, Float>(deserializer)?;
    Ok(Vector2::new(x, y))
}

pub(crate) fn deser_pair<'de, D, T>(deserializer: D) -> Result<[T; 2], D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    struct Vec2Visitor<T>(PhantomData<T>);

    impl<'de, T> Visitor<'de> for Vec2Visitor<T>
    where
        T: Deserialize<'de> + FromStr,
        T::Err: fmt::Display,
    {
        type Value = [T; 2];

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an array of 2 numbers or a string e.g. 'width height'")
        }

        fn visit_str<E>(self, value: &str) -> Result<[T; 2], E>
        where
            E: de::Error,
        {
            parse_numbers_str::<T, 2>(value).map_err(E::custom)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<[T; 2], A::Error>
        where
            A: SeqAccess<'de>,
        {
            let x: T = seq.next_element()?.ok_or_else(|| de::Error::custom("expected 2 elements"))?;
            let y: T = seq.next_element()?.ok_or_else(|| de::Error::custom("expected 2 elements"))?;
            if seq.next_element::<T>()?.is_some() {
                return Err(de::Error::custom("expected only 2 elements"));
            }
            Ok([x, y])
        }
    }

    deserializer.deserialize_any(Vec2Visitor::<T>(PhantomData))
}

/// Helper function: parse a string like "25 25 25" into N numbers
fn parse_numbers_str<T, const N: usize>(s: &str) -> Result<[T; N], String>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != N {
        return Err(format!("Expected {} values, got {}", N, parts.len()));
    }
    let numbers = parts
        .into_iter()
        .map(|x| x.parse::<T>().map_err(|e| e.to_string()))
        .collect::<Result<Vec<T>, String>>()?;

    numbers
        .try_into()
        .map_err(|_| String::from("failed to convert Vec to array"))
}
