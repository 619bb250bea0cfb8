//! Geohash encoding, decoding and grid adjacency.
//!
//! A geohash interleaves longitude and latitude bisection bits (longitude
//! first) and packs them five at a time into the base-32 alphabet
//! `0123456789bcdefghjkmnpqrstuvwxyz`. Each additional character shrinks the
//! cell by a factor of 32.

pub mod codec;
pub mod neighbors;

pub use codec::{
    Decoded, GeohashInput, children, decode, decode_bbox, decode_bbox_batch, decode_bbox_many,
    decode_batch, decode_many, decode_with_error, encode, is_valid_geohash, parent,
};
pub use neighbors::{Neighbors, neighbor, neighbors};
