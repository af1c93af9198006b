//! Geometry utilities for bmesh-kernel.
//!
//! This module provides the small amount of point arithmetic the topology
//! queries need (face centroids, edge midpoints, polygon normals).

pub mod metrics;
