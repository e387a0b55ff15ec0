use crate::StaticVec;
use alloc::format;
use core::marker::PhantomData;
use serde_core::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
};

impl<T: Serialize, const N: usize> Serialize for StaticVec<T, N> {
    /// Serializes as a plain sequence, interchangeable with `Vec<T>`.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>, const N: usize> Deserialize<'de> for StaticVec<T, N> {
    /// Deserializes from a sequence.
    ///
    /// A sequence longer than the capacity `N` is a data error, not a panic:
    /// the over-long input is rejected through the deserializer's own error
    /// type, on the size hint when one is given or on the element that does
    /// not fit otherwise.
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StaticVecVisitor<T, const N: usize> {
            _marker: PhantomData<T>,
        }

        impl<'de, T: Deserialize<'de>, const N: usize> Visitor<'de> for StaticVecVisitor<T, N> {
            type Value = StaticVec<T, N>;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a sequence")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                if let Some(hint) = seq.size_hint() {
                    if hint > N {
                        return Err(de::Error::custom(format!(
                            "StaticVec capacity {} exceeded (incoming len hint: {})",
                            N, hint
                        )));
                    }
                }

                let mut vec = StaticVec::new();

                while let Some(element) = seq.next_element()? {
                    if vec.try_push(element).is_err() {
                        return Err(de::Error::custom(format!(
                            "StaticVec capacity {} exceeded while deserializing sequence",
                            N
                        )));
                    }
                }

                Ok(vec)
            }
        }

        deserializer.deserialize_seq(StaticVecVisitor {
            _marker: PhantomData,
        })
    }
}
