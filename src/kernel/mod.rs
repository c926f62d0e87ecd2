pub(crate) mod sobel;
