mod decoder;
mod properties;
