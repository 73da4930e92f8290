pub mod geo2topo;
pub mod topo2geo;
pub mod topoquantize;
