/// Implements `From<Vec<T>>` and `From<&[T; N]>` for a newtype over `Vec<$item>`,
/// converting every element with `$item::from`.
#[macro_export]
macro_rules! impl_from_vec {
	($($outer:ty => $item:ty),* $(,)?) => {$(
		impl<T> From<Vec<T>> for $outer
		where
			$item: From<T>,
		{
			fn from(value: Vec<T>) -> Self {
				Self(value.into_iter().map(<$item>::from).collect())
			}
		}

		impl<'a, T, const N: usize> From<&'a [T; N]> for $outer
		where
			$item: From<&'a T>,
		{
			fn from(value: &'a [T; N]) -> Self {
				Self(value.iter().map(<$item>::from).collect())
			}
		}
	)*};
}
